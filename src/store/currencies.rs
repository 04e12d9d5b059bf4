//! Currency catalog repository
//!
//! The catalog is a read-only whitelist of currencies a transfer may be
//! denominated in. Seeded externally, never written by this service.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::CurrencyCode;
use crate::store::StoreError;
use crate::transfer::CurrencyCatalog;

/// Postgres-backed currency catalog
#[derive(Clone)]
pub struct PgCurrencies {
    pool: PgPool,
}

impl PgCurrencies {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyCatalog for PgCurrencies {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM currency WHERE code = $1)"#)
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_all(&self) -> Result<Vec<CurrencyCode>, StoreError> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT code, name, country
            FROM currency
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(code, name, country)| CurrencyCode {
                code,
                name,
                country,
            })
            .collect())
    }
}
