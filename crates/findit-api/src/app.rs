//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use findit_auth::jwt::{JwtDecoder, JwtEncoder};
use findit_auth::password::PasswordHasher;
use findit_auth::session::SessionManager;
use findit_core::config::AppConfig;
use findit_core::error::AppError;
use findit_core::traits::storage::BlobStore;
use findit_database::repositories::{
    category, chat, feedback, opportunity, portfolio, refresh_token, user,
};
use findit_realtime::{ChatBackend, RealtimeEngine};
use findit_service::{
    CategoryService, ChatService, FeedbackService, OpportunityService, PortfolioService,
    UploadService, UserService,
};
use findit_storage::DiskStore;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::error::error_envelope;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = state.config.server.request_timeout();

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(axum_middleware::from_fn(error_envelope))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Construct repositories, auth, services, and the real-time engine.
pub async fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    // ── Step 1: Upload storage ───────────────────────────────────
    let storage: Arc<dyn BlobStore> = Arc::new(DiskStore::open(&config.upload.directory).await?);
    info!(directory = %config.upload.directory, "Upload storage ready");

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(user::UserRepository::new(db_pool.clone()));
    let refresh_repo = Arc::new(refresh_token::RefreshTokenRepository::new(db_pool.clone()));
    let category_repo = Arc::new(category::CategoryRepository::new(db_pool.clone()));
    let opportunity_repo = Arc::new(opportunity::OpportunityRepository::new(db_pool.clone()));
    let room_repo = Arc::new(chat::ChatRoomRepository::new(db_pool.clone()));
    let message_repo = Arc::new(chat::MessageRepository::new(db_pool.clone()));
    let feedback_repo = Arc::new(feedback::FeedbackRepository::new(db_pool.clone()));
    let portfolio_repo = Arc::new(portfolio::PortfolioRepository::new(db_pool.clone()));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&password_hasher),
        Arc::clone(&user_repo),
        Arc::clone(&refresh_repo),
        &config.auth,
    ));

    // ── Step 4: Services ─────────────────────────────────────────
    let upload_service = Arc::new(UploadService::new(storage, config.upload.clone()));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&upload_service),
    ));
    let category_service = Arc::new(CategoryService::new(category_repo));
    let opportunity_service = Arc::new(OpportunityService::new(opportunity_repo));
    let chat_service = Arc::new(ChatService::new(
        room_repo,
        message_repo,
        Arc::clone(&user_repo),
    ));
    let feedback_service = Arc::new(FeedbackService::new(feedback_repo, Arc::clone(&user_repo)));
    let portfolio_service = Arc::new(PortfolioService::new(
        portfolio_repo,
        Arc::clone(&upload_service),
    ));

    // ── Step 5: Realtime engine ──────────────────────────────────
    let chat_backend: Arc<dyn ChatBackend> = chat_service.clone();
    let realtime = Arc::new(RealtimeEngine::new(config.realtime.clone(), chat_backend));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        session_manager,
        realtime,
        user_service,
        category_service,
        opportunity_service,
        chat_service,
        feedback_service,
        portfolio_service,
        upload_service,
    })
}

/// Runs the FindIt server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    info!("Starting FindIt server...");

    let addr = config.server.bind_address();
    let state = build_state(config, db_pool).await?;
    let realtime = Arc::clone(&state.realtime);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("FindIt server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            realtime.shutdown();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
