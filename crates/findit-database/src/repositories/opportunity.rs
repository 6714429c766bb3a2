//! Opportunity repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use findit_core::error::{AppError, ErrorKind};
use findit_core::result::AppResult;
use findit_core::types::Pagination;
use findit_entity::category::Category;
use findit_entity::opportunity::{
    CompletedOpportunity, CreateOpportunity, Opportunity, OpportunityDetail, OpportunityFilter,
    OpportunityListing, OpportunityStatus, UpdateOpportunity,
};
use findit_entity::user::{UserProfile, UserSummary};

use super::is_foreign_key_violation;

/// Opportunity columns. Prices are stored as NUMERIC and read as float8.
const OPPORTUNITY_COLUMNS: &str = "o.id, o.user_id, o.category_id, o.title, o.description, \
     o.price_min::float8 AS price_min, o.price_max::float8 AS price_max, \
     o.city, o.state, o.country, o.status, o.is_deleted, o.deleted_at, \
     o.created_at, o.updated_at";

const CATEGORY_COLUMNS: &str = "c.id AS c_id, c.name AS c_name, c.slug AS c_slug, \
     c.description AS c_description, c.icon_url AS c_icon_url, c.is_active AS c_is_active, \
     c.created_at AS c_created_at, c.updated_at AS c_updated_at";

/// Joined category columns shared by the listing and detail rows.
#[derive(Debug, FromRow)]
struct CategoryColumns {
    c_id: Uuid,
    c_name: String,
    c_slug: String,
    c_description: Option<String>,
    c_icon_url: Option<String>,
    c_is_active: bool,
    c_created_at: DateTime<Utc>,
    c_updated_at: DateTime<Utc>,
}

impl From<CategoryColumns> for Category {
    fn from(c: CategoryColumns) -> Self {
        Self {
            id: c.c_id,
            name: c.c_name,
            slug: c.c_slug,
            description: c.c_description,
            icon_url: c.c_icon_url,
            is_active: c.c_is_active,
            created_at: c.c_created_at,
            updated_at: c.c_updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ListingRow {
    #[sqlx(flatten)]
    opportunity: Opportunity,
    #[sqlx(flatten)]
    category: CategoryColumns,
    u_id: Uuid,
    u_name: String,
    u_user_photo: Option<String>,
}

impl From<ListingRow> for OpportunityListing {
    fn from(row: ListingRow) -> Self {
        Self {
            opportunity: row.opportunity,
            category: row.category.into(),
            user: UserSummary {
                id: row.u_id,
                name: row.u_name,
                user_photo: row.u_user_photo,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct DetailRow {
    #[sqlx(flatten)]
    opportunity: Opportunity,
    #[sqlx(flatten)]
    category: CategoryColumns,
    u_id: Uuid,
    u_name: String,
    u_email: String,
    u_user_photo: Option<String>,
    u_city: Option<String>,
    u_state: Option<String>,
    u_country: Option<String>,
}

impl From<DetailRow> for OpportunityDetail {
    fn from(row: DetailRow) -> Self {
        Self {
            opportunity: row.opportunity,
            category: row.category.into(),
            user: UserProfile {
                id: row.u_id,
                name: row.u_name,
                email: row.u_email,
                user_photo: row.u_user_photo,
                city: row.u_city,
                state: row.u_state,
                country: row.u_country,
            },
        }
    }
}

/// A bound parameter of the dynamic listing query.
enum FilterParam {
    Text(String),
    Float(f64),
    Int(i64),
}

/// Repository for opportunities and their completion records.
#[derive(Debug, Clone)]
pub struct OpportunityRepository {
    pool: PgPool,
}

impl OpportunityRepository {
    /// Create a new opportunity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an opportunity by primary key, including soft-deleted rows.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Opportunity>> {
        let sql = format!("SELECT {OPPORTUNITY_COLUMNS} FROM opportunities o WHERE o.id = $1");
        sqlx::query_as::<_, Opportunity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find opportunity", e)
            })
    }

    /// Load a live opportunity with its category and poster.
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<OpportunityDetail>> {
        let sql = format!(
            "SELECT {OPPORTUNITY_COLUMNS}, {CATEGORY_COLUMNS}, \
                    u.id AS u_id, u.name AS u_name, u.email AS u_email, \
                    u.user_photo AS u_user_photo, u.city AS u_city, \
                    u.state AS u_state, u.country AS u_country \
             FROM opportunities o \
             JOIN categories c ON c.id = o.category_id \
             JOIN users u ON u.id = o.user_id \
             WHERE o.id = $1 AND o.is_deleted = FALSE"
        );
        let row = sqlx::query_as::<_, DetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load opportunity", e)
            })?;
        Ok(row.map(Into::into))
    }

    /// Search live opportunities.
    pub async fn search(&self, filter: &OpportunityFilter) -> AppResult<Vec<OpportunityListing>> {
        let (where_clause, params) = build_conditions(filter);
        let next = params.len() + 1;
        let sql = format!(
            "SELECT {OPPORTUNITY_COLUMNS}, {CATEGORY_COLUMNS}, \
                    u.id AS u_id, u.name AS u_name, u.user_photo AS u_user_photo \
             FROM opportunities o \
             JOIN categories c ON c.id = o.category_id \
             JOIN users u ON u.id = o.user_id \
             {where_clause} \
             ORDER BY {} LIMIT ${next} OFFSET ${}",
            filter.sort.order_by(),
            next + 1
        );

        let mut query = sqlx::query_as::<_, ListingRow>(&sql);
        for param in params {
            query = match param {
                FilterParam::Text(v) => query.bind(v),
                FilterParam::Float(v) => query.bind(v),
                FilterParam::Int(v) => query.bind(v),
            };
        }

        let rows = query
            .bind(filter.pagination.limit)
            .bind(filter.pagination.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search opportunities", e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count live opportunities, optionally within a category slug.
    /// A slug that names no category does not narrow the count.
    pub async fn count(&self, category_slug: Option<&str>) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM opportunities o \
             JOIN categories c ON c.id = o.category_id \
             WHERE o.is_deleted = FALSE \
               AND ($1::text IS NULL OR c.slug = $1 \
                    OR NOT EXISTS (SELECT 1 FROM categories cs WHERE cs.slug = $1))",
        )
        .bind(category_slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count opportunities", e))
    }

    /// List a user's live opportunities, newest first.
    pub async fn find_by_user(&self, user_id: Uuid, page: Pagination) -> AppResult<Vec<Opportunity>> {
        let sql = format!(
            "SELECT {OPPORTUNITY_COLUMNS} FROM opportunities o \
             WHERE o.user_id = $1 AND o.is_deleted = FALSE \
             ORDER BY o.created_at DESC, o.id LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Opportunity>(&sql)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list user opportunities", e)
            })
    }

    /// Insert an opportunity.
    pub async fn create(&self, data: &CreateOpportunity) -> AppResult<Opportunity> {
        let sql = format!(
            "INSERT INTO opportunities AS o \
                (user_id, category_id, title, description, price_min, price_max, city, state, country) \
             VALUES ($1, $2, $3, $4, $5::numeric, $6::numeric, $7, $8, $9) \
             RETURNING {OPPORTUNITY_COLUMNS}"
        );
        sqlx::query_as::<_, Opportunity>(&sql)
            .bind(data.user_id)
            .bind(data.category_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.price_min)
            .bind(data.price_max)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.country)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::not_found("Category not found")
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to create opportunity", e)
                }
            })
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdateOpportunity) -> AppResult<Opportunity> {
        let sql = format!(
            "UPDATE opportunities AS o SET \
                category_id = COALESCE($2, o.category_id), \
                title = COALESCE($3, o.title), \
                description = COALESCE($4, o.description), \
                price_min = COALESCE($5::numeric, o.price_min), \
                price_max = COALESCE($6::numeric, o.price_max), \
                city = COALESCE($7, o.city), \
                state = COALESCE($8, o.state), \
                country = COALESCE($9, o.country), \
                status = COALESCE($10, o.status), \
                updated_at = NOW() \
             WHERE o.id = $1 \
             RETURNING {OPPORTUNITY_COLUMNS}"
        );
        sqlx::query_as::<_, Opportunity>(&sql)
            .bind(id)
            .bind(data.category_id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.price_min)
            .bind(data.price_max)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.country)
            .bind(data.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::not_found("Category not found")
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to update opportunity", e)
                }
            })?
            .ok_or_else(|| AppError::not_found("Opportunity not found"))
    }

    /// Hide an opportunity. The row stays for audit.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE opportunities SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete opportunity", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Record who completed an opportunity and close it, in one transaction.
    pub async fn mark_completed(
        &self,
        id: Uuid,
        completed_by: Uuid,
    ) -> AppResult<(Opportunity, CompletedOpportunity)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let record = sqlx::query_as::<_, CompletedOpportunity>(
            "INSERT INTO completed_opportunities (opportunity_id, completed_by_user_id) \
             VALUES ($1, $2) RETURNING *",
        )
        .bind(id)
        .bind(completed_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found("User not found")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to record completion", e)
            }
        })?;

        let sql = format!(
            "UPDATE opportunities AS o SET status = $2, updated_at = NOW() \
             WHERE o.id = $1 RETURNING {OPPORTUNITY_COLUMNS}"
        );
        let opportunity = sqlx::query_as::<_, Opportunity>(&sql)
            .bind(id)
            .bind(OpportunityStatus::Completed)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to complete opportunity", e)
            })?
            .ok_or_else(|| AppError::not_found("Opportunity not found"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit completion", e)
        })?;

        Ok((opportunity, record))
    }
}

/// Build the `WHERE` clause and its parameters, numbered from `$1`.
fn build_conditions(filter: &OpportunityFilter) -> (String, Vec<FilterParam>) {
    let mut conditions = vec!["o.is_deleted = FALSE".to_string()];
    let mut params = Vec::new();

    let mut push = |template: &str, param: FilterParam, params: &mut Vec<FilterParam>| {
        params.push(param);
        conditions.push(template.replace("$?", &format!("${}", params.len())));
    };

    // An unknown slug leaves the listing unfiltered
    if let Some(slug) = &filter.category {
        push(
            "(c.slug = $? OR NOT EXISTS (SELECT 1 FROM categories cs WHERE cs.slug = $?))",
            FilterParam::Text(slug.clone()),
            &mut params,
        );
    }
    if let Some(city) = &filter.city {
        push("o.city ILIKE $?", FilterParam::Text(like_pattern(city)), &mut params);
    }
    if let Some(state) = &filter.state {
        push("o.state ILIKE $?", FilterParam::Text(like_pattern(state)), &mut params);
    }
    if let Some(country) = &filter.country {
        push("o.country ILIKE $?", FilterParam::Text(like_pattern(country)), &mut params);
    }
    if let Some(min) = filter.price_min {
        push("o.price_min >= $?::numeric", FilterParam::Float(min), &mut params);
    }
    if let Some(max) = filter.price_max {
        push("o.price_max <= $?::numeric", FilterParam::Float(max), &mut params);
    }
    if let Some(rating) = filter.min_rating {
        push(
            "COALESCE((SELECT AVG(f.rating)::float8 FROM feedbacks f WHERE f.reviewee_id = o.user_id), 0) >= $?",
            FilterParam::Float(rating),
            &mut params,
        );
    }
    if let Some(jobs) = filter.min_completed_jobs {
        push(
            "(SELECT COUNT(*) FROM completed_opportunities co WHERE co.completed_by_user_id = o.user_id) >= $?",
            FilterParam::Int(jobs),
            &mut params,
        );
    }

    (format!("WHERE {}", conditions.join(" AND ")), params)
}

/// Wrap a user-supplied fragment for a substring match, escaping wildcards.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
