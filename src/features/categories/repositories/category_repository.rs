use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Layer, Result};
use crate::features::categories::models::{Category, NewCategory};

/// Data access contract for the `categories` table.
///
/// Implementations perform no validation. Missing rows surface as
/// `AppError::NotFound`, driver failures as `AppError::Database`.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All rows ordered by id; empty when the table is empty
    async fn find_all(&self) -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: i32) -> Result<Category>;

    /// Insert and return the row with storage-assigned id and timestamps
    async fn create(&self, category: &NewCategory) -> Result<Category>;

    /// Overwrite name/description and refresh `updated_at`
    async fn update(&self, id: i32, category: &Category) -> Result<()>;

    async fn delete(&self, id: i32) -> Result<()>;
}

pub(crate) fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Category with id {} not found", id))
}

fn storage_error(operation: &'static str, e: sqlx::Error) -> AppError {
    tracing::error!(layer = %Layer::Repository, operation, "Database error: {:?}", e);
    AppError::Database(e).context(Layer::Repository, format!("{} failed", operation))
}

/// PostgreSQL-backed repository
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("find_all", e))
    }

    async fn find_by_id(&self, id: i32) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find_by_id", e))?
        .ok_or_else(|| not_found(id))
    }

    async fn create(&self, category: &NewCategory) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("create", e))
    }

    async fn update(&self, id: i32, category: &Category) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $1, description = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
