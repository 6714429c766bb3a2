//! Shared handler state.

use std::sync::Arc;

use sqlx::PgPool;

use findit_auth::jwt::JwtDecoder;
use findit_auth::session::SessionManager;
use findit_core::config::AppConfig;
use findit_realtime::RealtimeEngine;
use findit_service::{
    CategoryService, ChatService, FeedbackService, OpportunityService, PortfolioService,
    UploadService, UserService,
};

/// Everything a handler can reach through `State<AppState>`.
///
/// Cloned per request, so every heavy member sits behind an `Arc`
/// (`PgPool` is already reference-counted).
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_pool: PgPool,

    /// Verifies bearer tokens for the `AuthUser` extractor and the WS upgrade.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Register, login, refresh rotation, logout.
    pub session_manager: Arc<SessionManager>,
    /// Socket registry and room fan-out.
    pub realtime: Arc<RealtimeEngine>,

    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub opportunity_service: Arc<OpportunityService>,
    pub chat_service: Arc<ChatService>,
    pub feedback_service: Arc<FeedbackService>,
    pub portfolio_service: Arc<PortfolioService>,
    pub upload_service: Arc<UploadService>,
}
