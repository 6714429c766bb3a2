//! Route definitions for the FindIt HTTP API.
//!
//! REST routes are organized by domain and mounted under `/api`. The
//! WebSocket channel lives at `/chat` and stored files at `/uploads`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::{Router, http::Uri};

use findit_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the router with every route and the shared state.
pub fn build_router(state: AppState) -> Router {
    let max_body = usize::try_from(state.config.upload.max_file_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(category_routes())
        .merge(opportunity_routes())
        .merge(chat_routes())
        .merge(feedback_routes())
        .merge(portfolio_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/chat", get(handlers::ws::ws_upgrade))
        .route("/uploads/{*path}", get(handlers::upload::serve_upload))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Profiles, photos, and per-user stats
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route(
            "/users/me",
            get(handlers::user::get_profile).patch(handlers::user::update_profile),
        )
        .route(
            "/users/me/photo",
            post(handlers::user::upload_photo).delete(handlers::user::delete_photo),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user).delete(handlers::user::delete_user),
        )
        .route("/users/{id}/stats", get(handlers::user::get_stats))
        .route("/users/{id}/feedbacks", get(handlers::feedback::list_for_user))
        .route("/users/{id}/rating", get(handlers::feedback::rating))
        .route("/users/{id}/portfolio", get(handlers::portfolio::list_for_user))
}

/// Category catalogue
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::category::get_category)
                .patch(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
}

/// Opportunity search and lifecycle
fn opportunity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/opportunities",
            get(handlers::opportunity::search).post(handlers::opportunity::create_opportunity),
        )
        .route("/opportunities/count", get(handlers::opportunity::count))
        .route("/opportunities/user/me", get(handlers::opportunity::list_mine))
        .route(
            "/opportunities/user/{id}",
            get(handlers::opportunity::list_by_user),
        )
        .route(
            "/opportunities/{id}",
            get(handlers::opportunity::get_opportunity)
                .patch(handlers::opportunity::update_opportunity)
                .delete(handlers::opportunity::delete_opportunity),
        )
        .route(
            "/opportunities/{id}/complete",
            patch(handlers::opportunity::complete_opportunity),
        )
}

/// Chat rooms and message history
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chat/rooms",
            get(handlers::chat::list_rooms).post(handlers::chat::create_room),
        )
        .route("/chat/rooms/{id}", get(handlers::chat::get_room))
        .route(
            "/chat/rooms/{id}/messages",
            get(handlers::chat::get_messages).post(handlers::chat::send_message),
        )
        .route("/chat/messages/{id}/read", patch(handlers::chat::mark_as_read))
}

/// Feedback mutations
fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedbacks", post(handlers::feedback::create_feedback))
        .route(
            "/feedbacks/{id}",
            patch(handlers::feedback::update_feedback).delete(handlers::feedback::delete_feedback),
        )
}

/// Portfolio gallery
fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio", post(handlers::portfolio::create_item))
        .route("/portfolio/upload", post(handlers::portfolio::upload_item))
        .route(
            "/portfolio/{id}",
            patch(handlers::portfolio::update_item).delete(handlers::portfolio::delete_item),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError(AppError::not_found(format!("Cannot find {}", uri.path())))
}
