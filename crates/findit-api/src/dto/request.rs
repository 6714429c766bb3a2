//! Request DTOs with validation rules.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use findit_entity::category::{CreateCategory, UpdateCategory};
use findit_entity::feedback::UpdateFeedback;
use findit_entity::opportunity::{CreateOpportunity, OpportunityStatus, UpdateOpportunity};
use findit_entity::portfolio::UpdatePortfolioItem;
use findit_entity::user::UpdateProfile;

// ── Auth ─────────────────────────────────────────────────────────

/// `POST /api/auth/register`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "password should not be empty"))]
    pub password: String,
}

/// `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password should not be empty"))]
    pub password: String,
}

/// `POST /api/auth/refresh` and `POST /api/auth/logout`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refreshToken should not be empty"))]
    pub refresh_token: String,
}

// ── Users ────────────────────────────────────────────────────────

/// `PATCH /api/users/me`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            city: req.city,
            state: req.state,
            country: req.country,
            phone: req.phone,
            occupation: req.occupation,
            bio: req.bio,
        }
    }
}

// ── Categories ───────────────────────────────────────────────────

/// `POST /api/categories`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "slug should not be empty"))]
    pub slug: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

impl From<CreateCategoryRequest> for CreateCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            icon_url: req.icon_url,
        }
    }
}

/// `PATCH /api/categories/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "slug should not be empty"))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            icon_url: req.icon_url,
            is_active: req.is_active,
        }
    }
}

/// `GET /api/categories?all=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryListQuery {
    /// Include inactive categories.
    #[serde(default)]
    pub all: bool,
}

// ── Opportunities ────────────────────────────────────────────────

/// `GET /api/opportunities` query string.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityQuery {
    /// Category slug.
    pub category: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[validate(range(min = 0.0, message = "priceMin must not be less than 0"))]
    pub price_min: Option<f64>,
    #[validate(range(min = 0.0, message = "priceMax must not be less than 0"))]
    pub price_max: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0, message = "minRating must be between 1 and 5"))]
    pub min_rating: Option<f64>,
    #[validate(range(min = 0, message = "minCompletedJobs must not be less than 0"))]
    pub min_completed_jobs: Option<i64>,
    /// `newest`, `oldest`, `price_asc` or `price_desc`.
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /api/opportunities/count` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountQuery {
    /// Category slug.
    pub category: Option<String>,
}

/// `POST /api/opportunities`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpportunityRequest {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
    pub category_id: Uuid,
    #[validate(range(min = 0.0, message = "priceMin must not be less than 0"))]
    pub price_min: Option<f64>,
    #[validate(range(min = 0.0, message = "priceMax must not be less than 0"))]
    pub price_max: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 1, message = "country should not be empty"))]
    pub country: String,
}

impl CreateOpportunityRequest {
    /// Convert into the insert model for `user_id`.
    pub fn into_create(self, user_id: Uuid) -> CreateOpportunity {
        CreateOpportunity {
            user_id,
            category_id: self.category_id,
            title: self.title,
            description: self.description,
            price_min: self.price_min,
            price_max: self.price_max,
            city: self.city,
            state: self.state,
            country: self.country,
        }
    }
}

/// `PATCH /api/opportunities/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOpportunityRequest {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0.0, message = "priceMin must not be less than 0"))]
    pub price_min: Option<f64>,
    #[validate(range(min = 0.0, message = "priceMax must not be less than 0"))]
    pub price_max: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 1, message = "country should not be empty"))]
    pub country: Option<String>,
    pub status: Option<OpportunityStatus>,
}

impl From<UpdateOpportunityRequest> for UpdateOpportunity {
    fn from(req: UpdateOpportunityRequest) -> Self {
        Self {
            category_id: req.category_id,
            title: req.title,
            description: req.description,
            price_min: req.price_min,
            price_max: req.price_max,
            city: req.city,
            state: req.state,
            country: req.country,
            status: req.status,
        }
    }
}

/// `PATCH /api/opportunities/{id}/complete`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOpportunityRequest {
    /// The user who did the work.
    pub completed_by_user_id: Uuid,
}

// ── Chat ─────────────────────────────────────────────────────────

/// `POST /api/chat/rooms`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub receiver_id: Uuid,
    pub opportunity_id: Option<Uuid>,
}

/// `POST /api/chat/rooms/{id}/messages`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "content should not be empty"))]
    pub content: String,
}

// ── Feedback ─────────────────────────────────────────────────────

/// `POST /api/feedbacks`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub reviewee_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

/// `PATCH /api/feedbacks/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl From<UpdateFeedbackRequest> for UpdateFeedback {
    fn from(req: UpdateFeedbackRequest) -> Self {
        Self {
            rating: req.rating,
            comment: req.comment,
        }
    }
}

// ── Portfolio ────────────────────────────────────────────────────

/// `POST /api/portfolio`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    #[validate(length(min = 1, message = "imageUrl should not be empty"))]
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// `PATCH /api/portfolio/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioRequest {
    #[validate(length(min = 1, message = "imageUrl should not be empty"))]
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<UpdatePortfolioRequest> for UpdatePortfolioItem {
    fn from(req: UpdatePortfolioRequest) -> Self {
        Self {
            image_url: req.image_url,
            title: req.title,
            description: req.description,
        }
    }
}
