//! # Project Repository
//!
//! Portfolio projects. `tags` and `images` are JSON TEXT columns.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{decode_json, encode_json};
use crate::error::{DbError, DbResult};
use sindean_core::{Project, ProjectStatus};

const COLUMNS: &str = "id, title_en, title_ar, desc_en, desc_ar, category, subcategory, status, \
    tags, images, featured_image, created_at, updated_at";

const INSERT_SQL: &str = r#"
    INSERT INTO projects (
        id, title_en, title_ar, desc_en, desc_ar, category, subcategory, status,
        tags, images, featured_image, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
"#;

const UPDATE_SQL: &str = r#"
    UPDATE projects SET
        title_en = ?2, title_ar = ?3, desc_en = ?4, desc_ar = ?5, category = ?6,
        subcategory = ?7, status = ?8, tags = ?9, images = ?10, featured_image = ?11,
        created_at = ?12, updated_at = ?13
    WHERE id = ?1
"#;

const UPSERT_CONFLICT: &str = r#"
    ON CONFLICT(id) DO UPDATE SET
        title_en = excluded.title_en, title_ar = excluded.title_ar,
        desc_en = excluded.desc_en, desc_ar = excluded.desc_ar,
        category = excluded.category, subcategory = excluded.subcategory,
        status = excluded.status, tags = excluded.tags, images = excluded.images,
        featured_image = excluded.featured_image, updated_at = excluded.updated_at
"#;

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    title_en: String,
    title_ar: String,
    desc_en: String,
    desc_ar: String,
    category: String,
    subcategory: String,
    status: ProjectStatus,
    tags: String,
    images: String,
    featured_image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = DbError;

    fn try_from(row: ProjectRow) -> DbResult<Self> {
        Ok(Project {
            tags: decode_json("tags", &row.tags)?,
            images: decode_json("images", &row.images)?,
            id: row.id,
            title_en: row.title_en,
            title_ar: row.title_ar,
            desc_en: row.desc_en,
            desc_ar: row.desc_ar,
            category: row.category,
            subcategory: row.subcategory,
            status: row.status,
            featured_image: row.featured_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProjectRepository { pool }
    }

    /// All projects, newest first.
    pub async fn list(&self) -> DbResult<Vec<Project>> {
        debug!("Listing projects");

        sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Project::try_from)
        .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Project>> {
        debug!(id = %id, "Getting project by ID");

        sqlx::query_as::<_, ProjectRow>(&format!("SELECT {COLUMNS} FROM projects WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Project::try_from)
            .transpose()
    }

    async fn write(&self, sql: &str, project: &Project) -> DbResult<u64> {
        let tags = encode_json("tags", &project.tags)?;
        let images = encode_json("images", &project.images)?;

        let result = sqlx::query(sql)
            .bind(&project.id)
            .bind(&project.title_en)
            .bind(&project.title_ar)
            .bind(&project.desc_en)
            .bind(&project.desc_ar)
            .bind(&project.category)
            .bind(&project.subcategory)
            .bind(project.status)
            .bind(tags)
            .bind(images)
            .bind(&project.featured_image)
            .bind(project.created_at)
            .bind(project.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert(&self, project: &Project) -> DbResult<Project> {
        debug!(id = %project.id, "Inserting project");
        self.write(INSERT_SQL, project).await?;
        Ok(project.clone())
    }

    pub async fn update(&self, project: &Project) -> DbResult<()> {
        debug!(id = %project.id, "Updating project");

        if self.write(UPDATE_SQL, project).await? == 0 {
            return Err(DbError::not_found("Project", &project.id));
        }
        Ok(())
    }

    pub async fn upsert(&self, project: &Project) -> DbResult<()> {
        debug!(id = %project.id, "Upserting project");
        self.write(&format!("{INSERT_SQL} {UPSERT_CONFLICT}"), project)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting project");

        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Project", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
