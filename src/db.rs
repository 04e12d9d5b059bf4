//! Database module
//!
//! Database connection and schema verification utilities.

use sqlx::PgPool;

/// Verify database connectivity with a trivial round trip.
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = vec!["account", "currency", "transaction"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    // An empty catalog rejects every transfer, which is almost always a
    // missing seed rather than an intentional state.
    let currency_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM currency"#)
        .fetch_one(pool)
        .await?;

    if currency_count == 0 {
        tracing::warn!("Currency catalog is empty. All transfer requests will be rejected until it is seeded.");
    }

    Ok(true)
}
