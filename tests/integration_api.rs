//! Integration tests for the transfer flow against a real Postgres database.
//!
//! These tests require DATABASE_URL to point at a disposable database and
//! are ignored by default. Run with: cargo test -- --ignored

mod common;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use money_transfer::rates::{RateError, RateSource, RateTable};
use money_transfer::store::{PgAccounts, PgCurrencies};
use money_transfer::transfer::{LedgerCommitter, PgLedger, TransferRequest, TransferService};
use money_transfer::TransferError;

/// Stub rate source so the tests never leave the process
struct FixedRates(HashMap<String, f64>);

#[async_trait]
impl RateSource for FixedRates {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, RateError> {
        Ok(RateTable {
            base: base.to_string(),
            rates: self.0.clone(),
        })
    }
}

fn request(source: &str, target: &str, amount: rust_decimal::Decimal, currency: &str) -> TransferRequest {
    TransferRequest {
        source_account_id: source.to_string(),
        target_account_id: target.to_string(),
        amount,
        currency: currency.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres database"]
async fn test_startup_checks_pass_against_seeded_db() {
    let pool = common::setup_test_db().await;

    money_transfer::db::verify_connection(&pool)
        .await
        .expect("connectivity check should pass");
    assert!(money_transfer::db::check_schema(&pool)
        .await
        .expect("schema check should run"));
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres database"]
async fn test_same_currency_transfer_moves_money_and_logs_it() {
    let pool = common::setup_test_db().await;
    common::seed_account(&pool, "alpha", dec!(100), "USD").await;
    common::seed_account(&pool, "beta", dec!(20), "USD").await;

    let service = TransferService::new(
        PgAccounts::new(pool.clone()),
        PgCurrencies::new(pool.clone()),
        FixedRates(HashMap::new()),
        PgLedger::new(pool.clone()),
    );

    let outcome = service
        .transfer(&request("alpha", "beta", dec!(50), "USD"))
        .await
        .expect("transfer should succeed");

    assert_eq!(common::balance_of(&pool, "alpha").await, dec!(50));
    assert_eq!(common::balance_of(&pool, "beta").await, dec!(70));

    let (amount, currency): (rust_decimal::Decimal, String) = sqlx::query_as(
        r#"SELECT amount, currency FROM transaction WHERE id = $1"#,
    )
    .bind(outcome.transaction_id)
    .fetch_one(&pool)
    .await
    .expect("record should exist");

    assert_eq!(amount, dec!(50));
    assert_eq!(currency, "USD");
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres database"]
async fn test_cross_currency_transfer_stores_original_units() {
    let pool = common::setup_test_db().await;
    common::seed_account(&pool, "usd-src", dec!(100), "USD").await;
    common::seed_account(&pool, "eur-dst", dec!(0), "EUR").await;

    let service = TransferService::new(
        PgAccounts::new(pool.clone()),
        PgCurrencies::new(pool.clone()),
        FixedRates(HashMap::from([("EUR".to_string(), 0.9)])),
        PgLedger::new(pool.clone()),
    );

    let outcome = service
        .transfer(&request("usd-src", "eur-dst", dec!(50), "USD"))
        .await
        .expect("transfer should succeed");

    // Source debited in USD, target credited in EUR.
    assert_eq!(common::balance_of(&pool, "usd-src").await, dec!(50));
    assert_eq!(common::balance_of(&pool, "eur-dst").await, dec!(45.0));

    // The record keeps the request's original units.
    let (amount, currency): (rust_decimal::Decimal, String) = sqlx::query_as(
        r#"SELECT amount, currency FROM transaction WHERE id = $1"#,
    )
    .bind(outcome.transaction_id)
    .fetch_one(&pool)
    .await
    .expect("record should exist");

    assert_eq!(amount, dec!(50));
    assert_eq!(currency, "USD");
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres database"]
async fn test_insufficient_funds_leaves_store_untouched() {
    let pool = common::setup_test_db().await;
    common::seed_account(&pool, "poor", dec!(10), "USD").await;
    common::seed_account(&pool, "rich", dec!(1000), "USD").await;

    let service = TransferService::new(
        PgAccounts::new(pool.clone()),
        PgCurrencies::new(pool.clone()),
        FixedRates(HashMap::new()),
        PgLedger::new(pool.clone()),
    );

    let err = service
        .transfer(&request("poor", "rich", dec!(50), "USD"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::InsufficientFunds { .. }));
    assert_eq!(common::balance_of(&pool, "poor").await, dec!(10));
    assert_eq!(common::balance_of(&pool, "rich").await, dec!(1000));

    let records: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM transaction"#)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(records, 0);
}

#[tokio::test]
#[ignore = "requires a provisioned Postgres database"]
async fn test_failed_commit_rolls_back_balance_updates() {
    let pool = common::setup_test_db().await;
    common::seed_account(&pool, "one", dec!(100), "USD").await;
    common::seed_account(&pool, "two", dec!(0), "USD").await;

    // Sabotage the record insert so the commit unit cannot complete.
    sqlx::query(r#"DROP TABLE transaction"#)
        .execute(&pool)
        .await
        .unwrap();

    let accounts = PgAccounts::new(pool.clone());
    let ledger = PgLedger::new(pool.clone());

    use money_transfer::transfer::AccountLookup;
    let source = accounts.find_by_id("one").await.unwrap().unwrap();
    let target = accounts.find_by_id("two").await.unwrap().unwrap();

    let result = ledger
        .commit(
            &source,
            &target,
            dec!(50),
            dec!(50),
            &request("one", "two", dec!(50), "USD"),
        )
        .await;

    assert!(result.is_err());

    // Both balance updates were rolled back with the failed insert.
    assert_eq!(common::balance_of(&pool, "one").await, dec!(100));
    assert_eq!(common::balance_of(&pool, "two").await, dec!(0));
}
