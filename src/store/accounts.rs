//! Account repository
//!
//! Read access to account rows. Balance writes happen only through the
//! ledger committer, inside its transactional scope.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::Account;
use crate::store::StoreError;
use crate::transfer::AccountLookup;

/// Postgres-backed account lookup
#[derive(Clone)]
pub struct PgAccounts {
    pool: PgPool,
}

impl PgAccounts {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountLookup for PgAccounts {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError> {
        let row: Option<(String, Decimal, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, balance, currency, created_at
            FROM account
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, balance, currency, created_at)| Account {
            id,
            balance,
            currency,
            created_at,
        }))
    }
}
