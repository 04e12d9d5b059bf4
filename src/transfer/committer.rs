//! Ledger committer
//!
//! Applies a transfer to the ledger as a single Postgres transaction: debit
//! the source account, credit the target account and append the transaction
//! record. Either all three writes become durable or none do.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{Account, TransactionRecord};
use crate::store::StoreError;
use crate::transfer::{LedgerCommitter, TransferRequest};

/// Postgres-backed ledger committer
#[derive(Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerCommitter for PgLedger {
    async fn commit(
        &self,
        source: &Account,
        target: &Account,
        delta_source: Decimal,
        delta_target: Decimal,
        request: &TransferRequest,
    ) -> Result<TransactionRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Relative updates: the row lock serializes concurrent transfers
        // that share an account, so no balance read-modify-write is lost.
        sqlx::query(r#"UPDATE account SET balance = balance - $1 WHERE id = $2"#)
            .bind(delta_source)
            .bind(&source.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(r#"UPDATE account SET balance = balance + $1 WHERE id = $2"#)
            .bind(delta_target)
            .bind(&target.id)
            .execute(&mut *tx)
            .await?;

        // The record keeps the original request's amount and currency; the
        // timestamp is assigned here, at commit time.
        let record = TransactionRecord::new(
            source.id.clone(),
            target.id.clone(),
            request.amount,
            request.currency.clone(),
        );

        sqlx::query(
            r#"
            INSERT INTO transaction (id, source_account_id, target_account_id, amount, currency, ordered_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.source_account_id)
        .bind(&record.target_account_id)
        .bind(record.amount)
        .bind(&record.currency)
        .bind(record.ordered_at)
        .execute(&mut *tx)
        .await?;

        // An early return above drops `tx`, which rolls the whole unit back.
        tx.commit().await?;

        Ok(record)
    }
}
