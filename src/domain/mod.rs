//! Domain module
//!
//! Core domain types and the transfer error taxonomy.

pub mod error;
pub mod model;
pub mod money;

pub use error::TransferError;
pub use model::{Account, CurrencyCode, TransactionRecord};
pub use money::Money;
