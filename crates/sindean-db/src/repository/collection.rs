//! # Collection Repository
//!
//! Curated product groups for the home page.

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use sindean_core::Collection;

const INSERT_SQL: &str = r#"
    INSERT INTO collections (id, name_en, name_ar, desc_en, desc_ar, image, product_count)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

#[derive(Debug, FromRow)]
struct CollectionRow {
    id: String,
    name_en: String,
    name_ar: String,
    desc_en: String,
    desc_ar: String,
    image: String,
    product_count: i64,
}

impl From<CollectionRow> for Collection {
    fn from(row: CollectionRow) -> Self {
        Collection {
            id: row.id,
            name_en: row.name_en,
            name_ar: row.name_ar,
            desc_en: row.desc_en,
            desc_ar: row.desc_ar,
            image: row.image,
            product_count: row.product_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: SqlitePool,
}

impl CollectionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CollectionRepository { pool }
    }

    /// All collections in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Collection>> {
        debug!("Listing collections");

        let rows = sqlx::query_as::<_, CollectionRow>(
            "SELECT id, name_en, name_ar, desc_en, desc_ar, image, product_count \
             FROM collections ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Collection::from).collect())
    }

    async fn write(&self, sql: &str, collection: &Collection) -> DbResult<()> {
        sqlx::query(sql)
            .bind(&collection.id)
            .bind(&collection.name_en)
            .bind(&collection.name_ar)
            .bind(&collection.desc_en)
            .bind(&collection.desc_ar)
            .bind(&collection.image)
            .bind(collection.product_count)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert(&self, collection: &Collection) -> DbResult<Collection> {
        debug!(id = %collection.id, "Inserting collection");
        self.write(INSERT_SQL, collection).await?;
        Ok(collection.clone())
    }

    /// Inserts or replaces by id (seeding).
    pub async fn upsert(&self, collection: &Collection) -> DbResult<()> {
        debug!(id = %collection.id, "Upserting collection");
        let sql = format!(
            "{INSERT_SQL} ON CONFLICT(id) DO UPDATE SET \
             name_en = excluded.name_en, name_ar = excluded.name_ar, \
             desc_en = excluded.desc_en, desc_ar = excluded.desc_ar, \
             image = excluded.image, product_count = excluded.product_count"
        );
        self.write(&sql, collection).await
    }
}
