//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{extract::State, routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::TransferError;
use crate::error::AppError;
use crate::store::{PgAccounts, PgCurrencies};
use crate::transfer::{CurrencyCatalog, PgLedger, TransferRequest, TransferService};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

/// Wire format of the transfer endpoint. Field names are camelCase for
/// compatibility with existing integrations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequestBody {
    pub source_account_id: String,
    pub target_account_id: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct TransferResponseBody {
    pub response: String,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new().route("/transfer", post(transfer))
}

// =========================================================================
// POST /transfer
// =========================================================================

/// Transfer money between two accounts, converting across currencies when
/// the request is not denominated in an account's own currency.
async fn transfer(
    State(state): State<AppState>,
    Json(body): Json<TransferRequestBody>,
) -> Result<Json<TransferResponseBody>, AppError> {
    let request = TransferRequest {
        source_account_id: body.source_account_id,
        target_account_id: body.target_account_id,
        amount: body.amount,
        currency: body.currency,
    };

    tracing::info!(
        source = %request.source_account_id,
        target = %request.target_account_id,
        amount = %request.amount,
        currency = %request.currency,
        "Initiating transfer"
    );

    let service = TransferService::new(
        PgAccounts::new(state.pool.clone()),
        PgCurrencies::new(state.pool.clone()),
        state.rates.clone(),
        PgLedger::new(state.pool.clone()),
    );

    match service.transfer(&request).await {
        Ok(outcome) => {
            tracing::info!(
                transaction_id = %outcome.transaction_id,
                source = %request.source_account_id,
                target = %request.target_account_id,
                "Transfer completed successfully"
            );
            Ok(Json(TransferResponseBody {
                response: outcome.response,
            }))
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                source = %request.source_account_id,
                target = %request.target_account_id,
                "Transfer failed"
            );
            Err(present(err, &state).await)
        }
    }
}

/// Map a transfer failure to its HTTP representation. An invalid currency is
/// enriched here with the full catalog so the caller sees its options.
async fn present(err: TransferError, state: &AppState) -> AppError {
    match err {
        TransferError::InvalidCurrency { currency } => {
            let catalog = PgCurrencies::new(state.pool.clone());
            match catalog.list_all().await {
                Ok(valid_currencies) => AppError::InvalidCurrency {
                    currency,
                    valid_currencies,
                },
                // The catalog listing is best-effort decoration; the
                // original rejection still stands.
                Err(_) => AppError::Transfer(TransferError::InvalidCurrency { currency }),
            }
        }
        other => AppError::Transfer(other),
    }
}
