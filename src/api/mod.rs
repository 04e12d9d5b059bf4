//! API module
//!
//! HTTP surface: shared state, routes and middleware.

pub mod middleware;
pub mod routes;

use sqlx::PgPool;

use crate::rates::ExchangeRateClient;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub rates: ExchangeRateClient,
}
