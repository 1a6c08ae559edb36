//! # Cart Repository
//!
//! Server-side cart persistence, one JSON line list per cart id.
//!
//! ```text
//! CartSession ──► SqliteCartStore{cart_id} ──► CartRepository ──► carts
//!                 (implements CartStore)
//! ```
//!
//! The stored text is the same JSON the in-memory store keeps, so a
//! corrupt row surfaces as `CartStoreError::Corrupt` and the session
//! starts empty.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use sindean_core::cart::store::{decode_lines, encode_lines};
use sindean_core::cart::{CartLine, CartStore, CartStoreError};

#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Raw JSON for a cart, `None` if it was never saved.
    pub async fn load_raw(&self, cart_id: &str) -> DbResult<Option<String>> {
        let raw: Option<String> = sqlx::query_scalar("SELECT lines FROM carts WHERE id = ?1")
            .bind(cart_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(raw)
    }

    pub async fn save_raw(&self, cart_id: &str, raw: &str) -> DbResult<()> {
        debug!(cart_id = %cart_id, "Saving cart");

        sqlx::query(
            r#"
            INSERT INTO carts (id, lines, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET lines = excluded.lines, updated_at = excluded.updated_at
            "#,
        )
        .bind(cart_id)
        .bind(raw)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, cart_id: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM carts WHERE id = ?1")
            .bind(cart_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Store bound to one cart id.
    pub fn store(&self, cart_id: impl Into<String>) -> SqliteCartStore {
        SqliteCartStore {
            repo: self.clone(),
            cart_id: cart_id.into(),
        }
    }
}

/// [`CartStore`] backed by the `carts` table.
#[derive(Debug, Clone)]
pub struct SqliteCartStore {
    repo: CartRepository,
    cart_id: String,
}

impl SqliteCartStore {
    pub fn cart_id(&self) -> &str {
        &self.cart_id
    }
}

impl CartStore for SqliteCartStore {
    async fn load(&self) -> Result<Option<Vec<CartLine>>, CartStoreError> {
        match self.repo.load_raw(&self.cart_id).await? {
            Some(raw) => Ok(Some(decode_lines(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, lines: &[CartLine]) -> Result<(), CartStoreError> {
        let raw = encode_lines(lines)?;
        self.repo.save_raw(&self.cart_id, &raw).await?;
        Ok(())
    }
}
