//! Transfer error taxonomy
//!
//! Every way a single transfer attempt can fail. None of these leave the
//! ledger in an intermediate state; the service never retries on its own.

use thiserror::Error;

use crate::domain::Money;
use crate::rates::RateError;
use crate::store::StoreError;

/// Failure of a single transfer attempt.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Request amount is negative
    #[error("Cannot transfer negative amount of {currency}.")]
    NegativeAmount { currency: String },

    /// Source and target account ids are identical after trimming
    #[error("Source and target account cannot be the same.")]
    SameAccount,

    /// Request currency is not in the catalog. The presentation boundary
    /// attaches the list of valid currencies to the response.
    #[error("{currency} is not a valid currency.")]
    InvalidCurrency { currency: String },

    /// Either account id could not be resolved
    #[error("Account with ID: {0} is non existent.")]
    AccountNotFound(String),

    /// Source balance is below the amount converted into its currency
    #[error("Cannot proceed to money transfer due to low balance. Unable to transfer {requested} with a balance of {available}.")]
    InsufficientFunds { requested: Money, available: Money },

    /// The external exchange rate lookup failed
    #[error("Error while fetching exchange rates: {0}")]
    RateUnavailable(#[from] RateError),

    /// The ledger could not be read or the atomic commit could not complete.
    /// Account balances are exactly as they were before the attempt.
    #[error("Ledger operation failed: {0}")]
    Persistence(#[from] StoreError),
}

impl TransferError {
    /// Check if this is a client error (invalid input, 4xx-equivalent) as
    /// opposed to a service or infrastructure failure (5xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NegativeAmount { .. }
                | Self::SameAccount
                | Self::InvalidCurrency { .. }
                | Self::AccountNotFound(_)
                | Self::InsufficientFunds { .. }
        )
    }
}
