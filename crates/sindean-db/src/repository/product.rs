//! # Product Repository
//!
//! Catalog storage: products with their volume tiers.
//!
//! ## Column Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products                                                               │
//! │  ─────────                                                              │
//! │  id · name_en · name_ar · category · reference · price (halalas)        │
//! │  show_in_store · created_at · updated_at        ◄── plain columns       │
//! │                                                                         │
//! │  badges · images · finishes · specs · price_tiers ◄── JSON TEXT         │
//! │                                                                         │
//! │  price_tiers = [{"min":5,"price":90000},{"min":10,"price":80000}]       │
//! │  stored as given; ordering is irrelevant to price resolution            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{decode_json, encode_json};
use crate::error::{DbError, DbResult};
use sindean_core::{Money, Product, ProductCategory};

const COLUMNS: &str = "id, name_en, name_ar, desc_en, desc_ar, category, series_en, series_ar, \
    badges, image, images, finishes, specs, reference, catalog, price, price_tiers, \
    show_in_store, created_at, updated_at";

const INSERT_SQL: &str = r#"
    INSERT INTO products (
        id, name_en, name_ar, desc_en, desc_ar, category, series_en, series_ar,
        badges, image, images, finishes, specs, reference, catalog, price, price_tiers,
        show_in_store, created_at, updated_at
    ) VALUES (
        ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
        ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
        ?18, ?19, ?20
    )
"#;

// Same parameter numbering as INSERT_SQL.
const UPDATE_SQL: &str = r#"
    UPDATE products SET
        name_en = ?2, name_ar = ?3, desc_en = ?4, desc_ar = ?5, category = ?6,
        series_en = ?7, series_ar = ?8, badges = ?9, image = ?10, images = ?11,
        finishes = ?12, specs = ?13, reference = ?14, catalog = ?15, price = ?16,
        price_tiers = ?17, show_in_store = ?18, created_at = ?19, updated_at = ?20
    WHERE id = ?1
"#;

const UPSERT_CONFLICT: &str = r#"
    ON CONFLICT(id) DO UPDATE SET
        name_en = excluded.name_en, name_ar = excluded.name_ar,
        desc_en = excluded.desc_en, desc_ar = excluded.desc_ar,
        category = excluded.category, series_en = excluded.series_en,
        series_ar = excluded.series_ar, badges = excluded.badges, image = excluded.image,
        images = excluded.images, finishes = excluded.finishes, specs = excluded.specs,
        reference = excluded.reference, catalog = excluded.catalog, price = excluded.price,
        price_tiers = excluded.price_tiers, show_in_store = excluded.show_in_store,
        updated_at = excluded.updated_at
"#;

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name_en: String,
    name_ar: String,
    desc_en: String,
    desc_ar: String,
    category: ProductCategory,
    series_en: String,
    series_ar: String,
    badges: String,
    image: String,
    images: String,
    finishes: String,
    specs: String,
    reference: String,
    catalog: Option<String>,
    price: i64,
    price_tiers: String,
    show_in_store: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        Ok(Product {
            badges: decode_json("badges", &row.badges)?,
            images: decode_json("images", &row.images)?,
            finishes: decode_json("finishes", &row.finishes)?,
            specs: decode_json("specs", &row.specs)?,
            price_tiers: decode_json("price_tiers", &row.price_tiers)?,
            id: row.id,
            name_en: row.name_en,
            name_ar: row.name_ar,
            desc_en: row.desc_en,
            desc_ar: row.desc_ar,
            category: row.category,
            series_en: row.series_en,
            series_ar: row.series_ar,
            image: row.image,
            reference: row.reference,
            catalog: row.catalog,
            price: Money::from_halalas(row.price),
            show_in_store: row.show_in_store,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(Product::try_from).collect()
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let storefront = repo.list_storefront().await?;
/// let door = repo.get_by_id("oak-classic").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// All products, newest first (admin view).
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        debug!("Listing products");

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    /// The `limit` newest products.
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    /// Products visible in the storefront, newest first.
    pub async fn list_storefront(&self) -> DbResult<Vec<Product>> {
        debug!("Listing storefront products");

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE show_in_store = 1 \
             ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        into_products(rows)
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        debug!(id = %id, "Getting product by ID");

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets every product whose id is in `ids`. Unknown ids are skipped.
    ///
    /// Used to price carts and checkouts against the live catalog.
    pub async fn get_many(&self, ids: &[&str]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = ids.len(), "Getting products by IDs");

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id IN ({placeholders})");

        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        into_products(query.fetch_all(&self.pool).await?)
    }

    async fn write(&self, sql: &str, product: &Product) -> DbResult<u64> {
        let badges = encode_json("badges", &product.badges)?;
        let images = encode_json("images", &product.images)?;
        let finishes = encode_json("finishes", &product.finishes)?;
        let specs = encode_json("specs", &product.specs)?;
        let price_tiers = encode_json("price_tiers", &product.price_tiers)?;

        let result = sqlx::query(sql)
            .bind(&product.id)
            .bind(&product.name_en)
            .bind(&product.name_ar)
            .bind(&product.desc_en)
            .bind(&product.desc_ar)
            .bind(product.category)
            .bind(&product.series_en)
            .bind(&product.series_ar)
            .bind(badges)
            .bind(&product.image)
            .bind(images)
            .bind(finishes)
            .bind(specs)
            .bind(&product.reference)
            .bind(&product.catalog)
            .bind(product.price.halalas())
            .bind(price_tiers)
            .bind(product.show_in_store)
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - id already taken
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, "Inserting product");
        self.write(INSERT_SQL, product).await?;
        Ok(product.clone())
    }

    /// Replaces a stored product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no product with this id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        if self.write(UPDATE_SQL, product).await? == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }
        Ok(())
    }

    /// Inserts or replaces by id (seeding).
    pub async fn upsert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Upserting product");
        self.write(&format!("{INSERT_SQL} {UPSERT_CONFLICT}"), product)
            .await?;
        Ok(())
    }

    /// Hard-deletes a product. Placed orders keep their own line snapshots.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{at, db, product};
    use super::*;
    use sindean_core::{Finish, PriceTier};

    #[tokio::test]
    async fn test_insert_and_get_roundtrips_json_columns() {
        let db = db().await;
        let mut door = product("oak", 100000, &[(5, 90000), (10, 80000)], at(0));
        door.category = ProductCategory::FireRated;
        door.badges = vec!["New".into()];
        door.finishes = vec![Finish {
            name: "Walnut".into(),
            color: "#5C4033".into(),
            image_index: Some(1),
        }];
        door.specs.fire_rating = Some("60 min".into());

        db.products().insert(&door).await.unwrap();
        let loaded = db.products().get_by_id("oak").await.unwrap().unwrap();

        assert_eq!(loaded, door);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let db = db().await;
        assert!(db.products().get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let db = db().await;
        let door = product("oak", 1000, &[], at(0));
        db.products().insert(&door).await.unwrap();

        let err = db.products().insert(&door).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_first_and_storefront_filter() {
        let db = db().await;
        let repo = db.products();
        repo.insert(&product("old", 1000, &[], at(0))).await.unwrap();
        let mut hidden = product("hidden", 1000, &[], at(5));
        hidden.show_in_store = false;
        repo.insert(&hidden).await.unwrap();
        repo.insert(&product("new", 1000, &[], at(10))).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new", "hidden", "old"]);

        let ids: Vec<String> = repo
            .list_storefront()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_update_replaces_tiers() {
        let db = db().await;
        let repo = db.products();
        let mut door = product("oak", 1000, &[(5, 900)], at(0));
        repo.insert(&door).await.unwrap();

        door.price_tiers = vec![PriceTier::new(3, Money::from_halalas(950))];
        door.updated_at = at(30);
        repo.update(&door).await.unwrap();

        let loaded = repo.get_by_id("oak").await.unwrap().unwrap();
        assert_eq!(loaded.price_tiers, door.price_tiers);
        assert_eq!(loaded.updated_at, at(30));
        assert_eq!(loaded.created_at, at(0));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = db().await;
        let err = db
            .products()
            .update(&product("ghost", 1000, &[], at(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_replaces() {
        let db = db().await;
        let repo = db.products();
        let mut door = product("oak", 1000, &[], at(0));
        repo.upsert(&door).await.unwrap();

        door.price = Money::from_halalas(1200);
        repo.upsert(&door).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let loaded = repo.get_by_id("oak").await.unwrap().unwrap();
        assert_eq!(loaded.price, Money::from_halalas(1200));
    }

    #[tokio::test]
    async fn test_get_many_skips_unknown() {
        let db = db().await;
        let repo = db.products();
        repo.insert(&product("a", 1000, &[], at(0))).await.unwrap();
        repo.insert(&product("b", 2000, &[], at(1))).await.unwrap();

        let found = repo.get_many(&["a", "b", "zzz"]).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(repo.get_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let repo = db.products();
        repo.insert(&product("a", 1000, &[], at(0))).await.unwrap();

        repo.delete("a").await.unwrap();
        assert!(repo.get_by_id("a").await.unwrap().is_none());
        assert!(matches!(repo.delete("a").await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_schema() {
        let db = db().await;
        let mut door = product("neg", 1000, &[], at(0));
        door.price = Money::from_halalas(-1);
        let err = db.products().insert(&door).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }
}
