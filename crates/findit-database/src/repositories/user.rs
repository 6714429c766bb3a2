//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_core::types::Pagination;
use findit_entity::feedback::round_rating;
use findit_entity::user::{CreateUser, UpdateProfile, User, UserStats, UserSummary};

use super::is_unique_violation;

/// Repository for user CRUD and reputation queries.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email. Matching is exact.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Fetch the public card of a user.
    pub async fn find_summary(&self, id: Uuid) -> AppResult<Option<UserSummary>> {
        sqlx::query_as::<_, UserSummary>("SELECT id, name, user_photo FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load user summary", e)
            })
    }

    /// Whether a user with this id exists.
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check user", e))
    }

    /// List users, newest first.
    pub async fn find_all(&self, page: Pagination) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC, id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Insert a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, country, is_admin) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.country)
        .bind(data.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "users_email_key") {
                AppError::conflict("Email already registered")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    /// Apply a partial profile update.
    pub async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
                              city = COALESCE($3, city), \
                              state = COALESCE($4, state), \
                              country = COALESCE($5, country), \
                              phone = COALESCE($6, phone), \
                              occupation = COALESCE($7, occupation), \
                              bio = COALESCE($8, bio), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.country)
        .bind(&data.phone)
        .bind(&data.occupation)
        .bind(&data.bio)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Set or clear the profile photo path.
    pub async fn set_photo(&self, id: Uuid, photo: Option<&str>) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET user_photo = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(photo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update photo", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Completed jobs and feedback aggregates for a user.
    pub async fn stats(&self, id: Uuid) -> AppResult<UserStats> {
        let (completed_jobs, average, feedback_count): (i64, Option<f64>, i64) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM completed_opportunities WHERE completed_by_user_id = $1), \
                (SELECT AVG(rating)::float8 FROM feedbacks WHERE reviewee_id = $1), \
                (SELECT COUNT(*) FROM feedbacks WHERE reviewee_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user stats", e))?;

        Ok(UserStats {
            completed_jobs,
            average_rating: round_rating(average.unwrap_or(0.0)),
            feedback_count,
        })
    }

    /// Delete a user and everything that cascades from it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
