//! Request validation
//!
//! Structural and business checks that run before any state is touched.
//! Reads the currency catalog but has no side effects.

use rust_decimal::Decimal;

use crate::domain::TransferError;
use crate::transfer::{CurrencyCatalog, TransferRequest};

/// Validate a transfer request. Checks, in order: the amount is not
/// negative, source and target differ after trimming, and the request
/// currency is in the catalog.
pub async fn validate<C>(request: &TransferRequest, catalog: &C) -> Result<(), TransferError>
where
    C: CurrencyCatalog,
{
    if request.amount < Decimal::ZERO {
        return Err(TransferError::NegativeAmount {
            currency: request.currency.clone(),
        });
    }

    if request.source_account_id.trim() == request.target_account_id.trim() {
        return Err(TransferError::SameAccount);
    }

    if !catalog.exists(&request.currency).await? {
        return Err(TransferError::InvalidCurrency {
            currency: request.currency.clone(),
        });
    }

    Ok(())
}
