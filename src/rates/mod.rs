//! Exchange rate integration
//!
//! Client for the external exchange rate API and the conversion seam the
//! transfer orchestrator consumes. Rate tables are fetched per conversion
//! and never cached or persisted.

use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Errors from the exchange rate boundary.
///
/// Every variant is an externally caused failure; the caller may retry at
/// its discretion but nothing in the ledger was touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    /// The remote API answered with a non-success status
    #[error("exchange rate API responded with status {status}")]
    RemoteStatus { status: u16 },

    /// The request never completed (connection, DNS, protocol)
    #[error("exchange rate API unreachable: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout
    #[error("exchange rate API request timed out")]
    Timeout,

    /// The response body could not be decoded
    #[error("exchange rate API returned a malformed response: {0}")]
    Malformed(String),

    /// The fetched table has no rate for the requested currency. A silent
    /// default rate would corrupt balances, so this is treated the same as
    /// an unavailable service.
    #[error("exchange rate table is missing a rate for {currency}")]
    MissingRate { currency: String },

    /// The converted amount does not fit the representable decimal range
    #[error("converted amount into {currency} overflows")]
    Overflow { currency: String },
}

/// An ephemeral snapshot of exchange rates based at one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: String,
    /// Multipliers keyed by target currency code
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }
}

/// Source of exchange rates, the seam between the orchestrator and the
/// external API. Implementations must be safe to call concurrently.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the rate table based at `base`.
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, RateError>;

    /// Convert `amount` from one currency to another using a freshly
    /// fetched table based at `from`.
    async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, RateError> {
        let table = self.fetch_rates(from).await?;

        let rate = table.rate_for(to).ok_or_else(|| RateError::MissingRate {
            currency: to.to_string(),
        })?;

        // from_f64 keeps the shortest round-trip representation, so a rate
        // of 0.9 multiplies as exactly 0.9.
        let multiplier = Decimal::from_f64(rate).ok_or_else(|| {
            RateError::Malformed(format!("rate {} for {} is not a finite number", rate, to))
        })?;

        // Checked multiplication: an extreme amount must surface as an
        // error, not abort the task.
        let converted = amount
            .checked_mul(multiplier)
            .ok_or_else(|| RateError::Overflow {
                currency: to.to_string(),
            })?;
        tracing::debug!(%amount, from, %converted, to, "currency converted");

        Ok(converted)
    }
}

/// Response shape of the external exchange rate API.
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[allow(dead_code)]
    result: Option<String>,
    conversion_rates: HashMap<String, f64>,
}

/// HTTP client for the external exchange rate API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ExchangeRateClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExchangeRateClient {
    /// Build a client with a bounded per-request timeout. A timeout surfaces
    /// as `RateError::Timeout` instead of hanging the transfer.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RateError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, RateError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), base);

        let response = self.http.get(&url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        tracing::debug!(%status, base, "exchange rate API responded");

        let body: ExchangeRateResponse = response
            .json()
            .await
            .map_err(|e| RateError::Malformed(e.to_string()))?;

        Ok(RateTable {
            base: base.to_string(),
            rates: body.conversion_rates,
        })
    }
}

fn classify(err: reqwest::Error) -> RateError {
    if err.is_timeout() {
        RateError::Timeout
    } else if let Some(status) = err.status() {
        RateError::RemoteStatus {
            status: status.as_u16(),
        }
    } else {
        RateError::Transport(err.to_string())
    }
}
