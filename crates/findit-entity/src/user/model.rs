//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered marketplace user.
///
/// Serializing a `User` never includes the password hash, so the struct
/// itself is the sanitized view returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email (unique, exact match).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Public path of the profile photo.
    pub user_photo: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Occupation or headline.
    pub occupation: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// Whether the user has administrative rights.
    pub is_admin: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the profile last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Country, if known at creation.
    pub country: Option<String>,
    /// Grant admin rights.
    pub is_admin: bool,
}

/// Partial profile update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    /// New display name.
    pub name: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New occupation.
    pub occupation: Option<String>,
    /// New biography.
    pub bio: Option<String>,
}
