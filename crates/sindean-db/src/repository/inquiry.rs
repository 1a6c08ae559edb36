//! # Inquiry Repository
//!
//! Contact-form submissions and their follow-up status.
//!
//! ```text
//! pending ──► read ──► contacted
//!    ▲                    │
//!    └────────────────────┘   (admin may set any status)
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use sindean_core::stats::InquiryStats;
use sindean_core::{Inquiry, InquiryStatus};

const COLUMNS: &str = "id, name, email, phone, message, product_id, status, created_at";

#[derive(Debug, FromRow)]
struct InquiryRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    message: String,
    product_id: Option<String>,
    status: InquiryStatus,
    created_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Inquiry {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            product_id: row.product_id,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InquiryRepository {
    pool: SqlitePool,
}

impl InquiryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        InquiryRepository { pool }
    }

    /// All inquiries, newest first.
    pub async fn list(&self) -> DbResult<Vec<Inquiry>> {
        debug!("Listing inquiries");
        self.recent(-1).await
    }

    /// The `limit` newest inquiries. A negative limit returns all of them.
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<Inquiry>> {
        let rows = sqlx::query_as::<_, InquiryRow>(&format!(
            "SELECT {COLUMNS} FROM inquiries ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Inquiry::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Inquiry>> {
        let row = sqlx::query_as::<_, InquiryRow>(&format!(
            "SELECT {COLUMNS} FROM inquiries WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Inquiry::from))
    }

    pub async fn insert(&self, inquiry: &Inquiry) -> DbResult<Inquiry> {
        info!(id = %inquiry.id, "Recording inquiry");

        sqlx::query(
            r#"
            INSERT INTO inquiries (id, name, email, phone, message, product_id, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&inquiry.id)
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(&inquiry.product_id)
        .bind(inquiry.status)
        .bind(inquiry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(inquiry.clone())
    }

    /// Sets the status and returns the updated inquiry.
    pub async fn update_status(&self, id: &str, status: InquiryStatus) -> DbResult<Inquiry> {
        debug!(id = %id, ?status, "Updating inquiry status");

        let result = sqlx::query("UPDATE inquiries SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inquiry", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Inquiry", id))
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inquiries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Totals per status in a single pass.
    pub async fn count_by_status(&self) -> DbResult<InquiryStats> {
        let rows: Vec<(InquiryStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM inquiries GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        let mut stats = InquiryStats::default();
        for (status, n) in rows {
            stats.total += n;
            match status {
                InquiryStatus::Pending => stats.new = n,
                InquiryStatus::Read => stats.in_progress = n,
                InquiryStatus::Contacted => stats.closed = n,
            }
        }
        Ok(stats)
    }
}
