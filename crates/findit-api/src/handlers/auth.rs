//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use findit_auth::session::{AuthResponse, TokenPair};
use findit_entity::user::User;

use crate::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = state
        .session_manager
        .register(req.name.trim(), req.email.trim(), &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = state
        .session_manager
        .login(req.email.trim(), &req.password)
        .await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state.session_manager.refresh(&req.refresh_token).await?;
    Ok(Json(tokens))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.session_manager.logout(&req.refresh_token).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let user = state.session_manager.identity(auth.user_id).await?;
    Ok(Json(user))
}
