//! Persistent domain entities
//!
//! Accounts, the currency catalog and the append-only transaction log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A balance-holding entity denominated in a single currency.
///
/// The balance is always expressed in the account's own `currency`; currency
/// conversion changes only the magnitude applied to it, never the currency
/// itself. Balances are mutated exclusively inside a ledger commit unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
    /// 3-letter currency code
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A row of the currency catalog, the whitelist of currencies a transfer
/// request may be denominated in. Read-only from this service's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyCode {
    pub code: String,
    pub name: String,
    pub country: String,
}

/// Append-only log entry created exactly once per successful transfer.
///
/// `amount` and `currency` record the original request's units, not the
/// per-account converted amounts. `ordered_at` is assigned at commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub source_account_id: String,
    pub target_account_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub ordered_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Build a new record for a transfer between two accounts, stamped now.
    pub fn new(
        source_account_id: impl Into<String>,
        target_account_id: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_account_id: source_account_id.into(),
            target_account_id: target_account_id.into(),
            amount,
            currency: currency.into(),
            ordered_at: Utc::now(),
        }
    }
}
