//! Common test utilities

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Setup test database - create tables, truncate and seed the catalog
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS account (
            id TEXT PRIMARY KEY,
            balance NUMERIC NOT NULL,
            currency TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create account table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS currency (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            country TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create currency table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transaction (
            id UUID PRIMARY KEY,
            source_account_id TEXT NOT NULL REFERENCES account (id),
            target_account_id TEXT NOT NULL REFERENCES account (id),
            amount NUMERIC NOT NULL,
            currency TEXT NOT NULL,
            ordered_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create transaction table");

    // Clean up DB for fresh state
    sqlx::query(r#"TRUNCATE TABLE transaction, account, currency CASCADE"#)
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    // Seed the currency catalog
    for (code, name, country) in [
        ("USD", "US Dollar", "United States"),
        ("EUR", "Euro", "European Union"),
        ("GBP", "Pound Sterling", "United Kingdom"),
    ] {
        sqlx::query(r#"INSERT INTO currency (code, name, country) VALUES ($1, $2, $3)"#)
            .bind(code)
            .bind(name)
            .bind(country)
            .execute(&pool)
            .await
            .expect("Failed to seed currency");
    }

    pool
}

/// Insert an account row and return its id
pub async fn seed_account(pool: &PgPool, id: &str, balance: Decimal, currency: &str) {
    sqlx::query(
        r#"
        INSERT INTO account (id, balance, currency, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(id)
    .bind(balance)
    .bind(currency)
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("Failed to seed account");
}

/// Read an account balance straight from the store
pub async fn balance_of(pool: &PgPool, id: &str) -> Decimal {
    sqlx::query_scalar(r#"SELECT balance FROM account WHERE id = $1"#)
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to read balance")
}
