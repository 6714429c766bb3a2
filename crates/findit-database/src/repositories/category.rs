//! Category repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_entity::category::{Category, CreateCategory, UpdateCategory};

use super::{is_foreign_key_violation, is_unique_violation};

const SLUG_CONFLICT: &str = "Category with this slug already exists";
const NAME_CONFLICT: &str = "Category with this name already exists";

/// Repository for work categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List categories by name, optionally including inactive ones.
    pub async fn find_all(&self, include_inactive: bool) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE is_active OR $1 ORDER BY name",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    /// Find a category by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    /// Insert a category.
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug, description, icon_url) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.icon_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    /// Insert a category unless its slug is already taken. Used by seeding.
    pub async fn create_if_absent(&self, data: &CreateCategory) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO categories (name, slug, description, icon_url) \
             VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.icon_url)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed category", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = COALESCE($2, name), \
                                   slug = COALESCE($3, slug), \
                                   description = COALESCE($4, description), \
                                   icon_url = COALESCE($5, icon_url), \
                                   is_active = COALESCE($6, is_active), \
                                   updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(&data.icon_url)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Delete a category. Fails with a conflict while opportunities use it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::conflict("Category is still used by opportunities")
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e, "categories_slug_key") {
        AppError::conflict(SLUG_CONFLICT)
    } else if is_unique_violation(&e, "categories_name_key") {
        AppError::conflict(NAME_CONFLICT)
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to write category", e)
    }
}
