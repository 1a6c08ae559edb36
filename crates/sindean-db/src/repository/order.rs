//! # Order Repository
//!
//! Orders are written once at checkout. Afterwards only `status` and
//! `updated_at` change; the priced `items` snapshot is never rewritten.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use super::{decode_json, encode_json};
use crate::error::{DbError, DbResult};
use sindean_core::{Locale, Money, Order, OrderStatus, PaymentMethod};

const COLUMNS: &str = "id, customer_name, email, phone, city, address, notes, payment_method, \
    locale, items, subtotal, fees, total_amount, status, created_at, updated_at";

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    customer_name: String,
    email: String,
    phone: Option<String>,
    city: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    payment_method: PaymentMethod,
    locale: Locale,
    items: String,
    subtotal: i64,
    fees: i64,
    total_amount: i64,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbError;

    fn try_from(row: OrderRow) -> DbResult<Self> {
        Ok(Order {
            items: decode_json("items", &row.items)?,
            id: row.id,
            customer_name: row.customer_name,
            email: row.email,
            phone: row.phone,
            city: row.city,
            address: row.address,
            notes: row.notes,
            payment_method: row.payment_method,
            locale: row.locale,
            subtotal: Money::from_halalas(row.subtotal),
            fees: Money::from_halalas(row.fees),
            total_amount: Money::from_halalas(row.total_amount),
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// All orders, newest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        debug!("Listing orders");
        self.recent(-1).await
    }

    /// The `limit` newest orders. A negative limit returns all of them.
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<Order>> {
        sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        sqlx::query_as::<_, OrderRow>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    pub async fn insert(&self, order: &Order) -> DbResult<Order> {
        info!(
            id = %order.id,
            total = %order.total_amount,
            lines = order.items.len(),
            "Recording order"
        );

        let items = encode_json("items", &order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_name, email, phone, city, address, notes, payment_method,
                locale, items, subtotal, fees, total_amount, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.city)
        .bind(&order.address)
        .bind(&order.notes)
        .bind(order.payment_method)
        .bind(order.locale)
        .bind(items)
        .bind(order.subtotal.halalas())
        .bind(order.fees.halalas())
        .bind(order.total_amount.halalas())
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(order.clone())
    }

    /// Sets the status, stamps `updated_at`, and returns the updated order.
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> DbResult<Order> {
        debug!(id = %id, ?status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{at, db, product};
    use super::*;
    use sindean_core::checkout::{
        new_order_id, price_checkout, CheckoutCustomer, CheckoutItem, CheckoutRequest,
    };
    use sindean_core::DEFAULT_COD_FEE;

    fn order(minutes: i64) -> Order {
        let catalog = vec![product("door", 100_000, &[(5, 90_000)], at(0))];
        let request = CheckoutRequest {
            items: vec![CheckoutItem {
                product_id: "door".into(),
                quantity: 7,
                finish: Some("Walnut".into()),
                price: None,
            }],
            customer: CheckoutCustomer {
                first_name: "Sara".into(),
                last_name: "Alharbi".into(),
                email: "sara@example.com".into(),
                phone: "+966511111111".into(),
                city: Some("Riyadh".into()),
                ..Default::default()
            },
            total: None,
            payment_method: PaymentMethod::Cod,
            locale: Locale::Ar,
        };
        let quote = price_checkout(&request, &catalog, DEFAULT_COD_FEE).unwrap();
        quote.into_order(&request, new_order_id(at(minutes)), at(minutes))
    }

    #[tokio::test]
    async fn test_insert_and_get_keeps_snapshot() {
        let db = db().await;
        let repo = db.orders();
        let placed = repo.insert(&order(0)).await.unwrap();

        let loaded = repo.get_by_id(&placed.id).await.unwrap().unwrap();
        assert_eq!(loaded, placed);
        assert_eq!(loaded.items[0].unit_price, Money::from_halalas(90_000));
        assert_eq!(loaded.subtotal, Money::from_halalas(630_000));
        assert_eq!(loaded.total_amount, Money::from_halalas(631_500));
        assert_eq!(loaded.locale, Locale::Ar);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = db().await;
        let repo = db.orders();
        let first = repo.insert(&order(0)).await.unwrap();
        let second = repo.insert(&order(5)).await.unwrap();

        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_status_stamps_time() {
        let db = db().await;
        let repo = db.orders();
        let placed = repo.insert(&order(0)).await.unwrap();

        let updated = repo
            .update_status(&placed.id, OrderStatus::Completed, at(90))
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert_eq!(updated.updated_at, at(90));
        assert_eq!(updated.created_at, at(0));

        let missing = repo.update_status("ORD-0", OrderStatus::Cancelled, at(91)).await;
        assert!(matches!(missing, Err(DbError::NotFound { .. })));
    }
}
