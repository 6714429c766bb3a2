//! Portfolio repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_entity::portfolio::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};

/// Repository for portfolio gallery items.
#[derive(Debug, Clone)]
pub struct PortfolioRepository {
    pool: PgPool,
}

impl PortfolioRepository {
    /// Create a new portfolio repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a live item by primary key.
    pub async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<PortfolioItem>> {
        sqlx::query_as::<_, PortfolioItem>(
            "SELECT * FROM portfolio_items WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find portfolio item", e))
    }

    /// A user's live items, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<PortfolioItem>> {
        sqlx::query_as::<_, PortfolioItem>(
            "SELECT * FROM portfolio_items WHERE user_id = $1 AND is_deleted = FALSE \
             ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list portfolio", e))
    }

    /// Insert an item.
    pub async fn create(&self, data: &CreatePortfolioItem) -> AppResult<PortfolioItem> {
        sqlx::query_as::<_, PortfolioItem>(
            "INSERT INTO portfolio_items (user_id, image_url, title, description) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.image_url)
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create portfolio item", e)
        })
    }

    /// Apply a partial update to a live item.
    pub async fn update(&self, id: Uuid, data: &UpdatePortfolioItem) -> AppResult<PortfolioItem> {
        sqlx::query_as::<_, PortfolioItem>(
            "UPDATE portfolio_items SET image_url = COALESCE($2, image_url), \
                                        title = COALESCE($3, title), \
                                        description = COALESCE($4, description), \
                                        updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(&data.image_url)
        .bind(&data.title)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update portfolio item", e)
        })?
        .ok_or_else(|| AppError::not_found("Portfolio item not found"))
    }

    /// Hide an item.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE portfolio_items SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete portfolio item", e)
        })?;
        Ok(result.rows_affected() > 0)
    }
}
