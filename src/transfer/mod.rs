//! Transfer module
//!
//! The transfer orchestration core: request validation, account resolution,
//! cross-currency conversion and the atomic ledger commit. Collaborators
//! (account lookup, currency catalog, ledger) sit behind traits so the
//! orchestration logic is independent of the backing store.

mod committer;
mod orchestrator;
pub mod validator;

pub use committer::PgLedger;
pub use orchestrator::TransferService;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, CurrencyCode, TransactionRecord};
use crate::store::StoreError;

/// A request to move a monetary amount, denominated in `currency`, from one
/// account to another. Immutable input to the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source_account_id: String,
    pub target_account_id: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Summary of a completed transfer, echoing the original request's units
/// rather than the per-account converted amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub transaction_id: Uuid,
    pub response: String,
}

impl TransferOutcome {
    pub(crate) fn completed(request: &TransferRequest, record: &TransactionRecord) -> Self {
        Self {
            transaction_id: record.id,
            response: format!(
                "Transfer of {:.2} {} from account {} to account {} completed successfully.",
                request.amount,
                request.currency,
                request.source_account_id,
                request.target_account_id
            ),
        }
    }
}

/// Read access to accounts by id.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError>;
}

/// The whitelist of currencies a request may be denominated in.
#[async_trait]
pub trait CurrencyCatalog: Send + Sync {
    async fn exists(&self, code: &str) -> Result<bool, StoreError>;

    async fn list_all(&self) -> Result<Vec<CurrencyCode>, StoreError>;
}

/// Applies a transfer to the ledger as one commit unit: debit the source,
/// credit the target and append the transaction record, all-or-nothing.
#[async_trait]
pub trait LedgerCommitter: Send + Sync {
    /// `delta_source` and `delta_target` are already converted into each
    /// account's own currency; `request` supplies the original units for the
    /// transaction record. On failure, balances are exactly as they were
    /// before the call.
    async fn commit(
        &self,
        source: &Account,
        target: &Account,
        delta_source: Decimal,
        delta_target: Decimal,
        request: &TransferRequest,
    ) -> Result<TransactionRecord, StoreError>;
}
