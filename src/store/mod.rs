//! Store module
//!
//! Postgres-backed repositories for accounts and the currency catalog, plus
//! the storage error type shared with the ledger committer.

mod accounts;
mod currencies;

pub use accounts::PgAccounts;
pub use currencies::PgCurrencies;

/// Errors from the backing store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
