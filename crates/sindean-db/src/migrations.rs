//! # Database Migrations
//!
//! Embedded SQL migrations, applied in version order and recorded in
//! `_sqlx_migrations`.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_initial_schema.sql   products, projects, collections, inquiries,
//!                              orders, specification_fields, carts
//! ```
//!
//! Migrations are compiled into the binary; nothing is read from disk at
//! runtime.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrator, path relative to this crate's Cargo.toml.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies all pending migrations. Safe to call repeatedly.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total embedded, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
