//! Money transfer backend library
//!
//! Re-exports modules for the server binary and integration tests.

pub mod api;
pub mod domain;
pub mod rates;
pub mod store;
pub mod transfer;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{Account, CurrencyCode, Money, TransactionRecord, TransferError};
pub use transfer::{TransferOutcome, TransferRequest, TransferService};
