//! # Specification Template Repository
//!
//! The admin-defined list of spec fields. The template is always replaced
//! as a whole, so each field is stored as one JSON payload plus its list
//! position.

use sqlx::SqlitePool;
use tracing::info;

use super::{decode_json, encode_json};
use crate::error::DbResult;
use sindean_core::SpecificationField;

#[derive(Debug, Clone)]
pub struct SpecificationRepository {
    pool: SqlitePool,
}

impl SpecificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SpecificationRepository { pool }
    }

    /// Fields in template order.
    pub async fn list(&self) -> DbResult<Vec<SpecificationField>> {
        let payloads: Vec<String> =
            sqlx::query_scalar("SELECT payload FROM specification_fields ORDER BY position")
                .fetch_all(&self.pool)
                .await?;

        payloads
            .iter()
            .map(|raw| decode_json("payload", raw))
            .collect()
    }

    /// Replaces the whole template atomically.
    pub async fn replace_all(&self, fields: &[SpecificationField]) -> DbResult<()> {
        info!(count = fields.len(), "Replacing specification template");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM specification_fields")
            .execute(&mut *tx)
            .await?;

        for (position, field) in fields.iter().enumerate() {
            sqlx::query(
                "INSERT INTO specification_fields (id, position, payload) VALUES (?1, ?2, ?3)",
            )
            .bind(&field.id)
            .bind(position as i64)
            .bind(encode_json("payload", field)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::db;
    use super::*;
    use crate::error::DbError;
    use sindean_core::SpecFieldType;

    fn field(id: &str, field_type: SpecFieldType) -> SpecificationField {
        SpecificationField {
            id: id.into(),
            key: Some(id.into()),
            name_en: id.to_uppercase(),
            name_ar: String::new(),
            field_type,
            unit: None,
            options: match field_type {
                SpecFieldType::Dropdown => vec!["Oak".into(), "Walnut".into()],
                _ => Vec::new(),
            },
            required: false,
        }
    }

    #[tokio::test]
    async fn test_replace_keeps_order() {
        let db = db().await;
        let repo = db.specifications();
        let fields = vec![
            field("material", SpecFieldType::Dropdown),
            field("thickness", SpecFieldType::Number),
            field("notes", SpecFieldType::Text),
        ];
        repo.replace_all(&fields).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), fields);

        let reordered = vec![fields[2].clone(), fields[0].clone()];
        repo.replace_all(&reordered).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), reordered);
    }

    #[tokio::test]
    async fn test_duplicate_ids_roll_back() {
        let db = db().await;
        let repo = db.specifications();
        let original = vec![field("material", SpecFieldType::Text)];
        repo.replace_all(&original).await.unwrap();

        let dupes = vec![
            field("a", SpecFieldType::Text),
            field("a", SpecFieldType::Number),
        ];
        let err = repo.replace_all(&dupes).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.list().await.unwrap(), original);
    }
}
