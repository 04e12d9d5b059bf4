//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{CurrencyCode, TransferError};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A transfer attempt failed
    #[error(transparent)]
    Transfer(TransferError),

    /// Invalid request currency, enriched at the presentation boundary with
    /// the full list of currencies the catalog accepts
    #[error("{currency} is not a valid currency.")]
    InvalidCurrency {
        currency: String,
        valid_currencies: Vec<CurrencyCode>,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_currencies: Option<Vec<CurrencyCode>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details, valid_currencies) = match &self {
            AppError::Transfer(transfer_err) => match transfer_err {
                // 400 Bad Request
                TransferError::NegativeAmount { currency } => (
                    StatusCode::BAD_REQUEST,
                    "negative_amount",
                    Some(currency.clone()),
                    None,
                ),
                TransferError::SameAccount => {
                    (StatusCode::BAD_REQUEST, "same_account", None, None)
                }
                TransferError::InvalidCurrency { currency } => (
                    StatusCode::BAD_REQUEST,
                    "invalid_currency",
                    Some(currency.clone()),
                    None,
                ),
                TransferError::InsufficientFunds { .. } => {
                    (StatusCode::BAD_REQUEST, "insufficient_funds", None, None)
                }

                // 404 Not Found
                TransferError::AccountNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "account_not_found",
                    Some(id.clone()),
                    None,
                ),

                // 502 Bad Gateway: the external rate service failed. The
                // whole attempt left no side effect, so the caller may retry.
                TransferError::RateUnavailable(cause) => {
                    tracing::error!("Exchange rate lookup failed: {}", cause);
                    (
                        StatusCode::BAD_GATEWAY,
                        "rate_service_unavailable",
                        Some(cause.to_string()),
                        None,
                    )
                }

                // 500: the atomic commit could not complete and was rolled
                // back in full.
                TransferError::Persistence(cause) => {
                    tracing::error!("Ledger commit failed: {}", cause);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "persistence_failure",
                        None,
                        None,
                    )
                }
            },

            AppError::InvalidCurrency {
                currency,
                valid_currencies,
            } => (
                StatusCode::BAD_REQUEST,
                "invalid_currency",
                Some(currency.clone()),
                Some(valid_currencies.clone()),
            ),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
            valid_currencies,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_client_errors_map_to_4xx() {
        let cases = [
            (
                AppError::Transfer(TransferError::NegativeAmount {
                    currency: "USD".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Transfer(TransferError::SameAccount),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Transfer(TransferError::InsufficientFunds {
                    requested: Money::new(dec!(50), "USD"),
                    available: Money::new(dec!(10), "USD"),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Transfer(TransferError::AccountNotFound("a1".to_string())),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_service_errors_map_to_5xx() {
        let rate = AppError::Transfer(TransferError::RateUnavailable(
            crate::rates::RateError::Timeout,
        ));
        assert_eq!(rate.into_response().status(), StatusCode::BAD_GATEWAY);

        let persistence = AppError::Transfer(TransferError::Persistence(
            crate::store::StoreError::Database(sqlx::Error::PoolTimedOut),
        ));
        assert_eq!(
            persistence.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_currency_carries_catalog() {
        let err = AppError::InvalidCurrency {
            currency: "XXX".to_string(),
            valid_currencies: vec![CurrencyCode {
                code: "USD".to_string(),
                name: "US Dollar".to_string(),
                country: "United States".to_string(),
            }],
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
