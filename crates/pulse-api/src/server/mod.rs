//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use pulse_common::{AppConfig, AppError};
use pulse_db::{
    create_pool, PgMemberStatsRepository, PgMessageEventRepository, PgTextConnectionRepository,
    PgVoiceConnectionRepository, PgVoiceSessionRepository,
};
use pulse_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health endpoints skip rate limiting so probes never get throttled
    let router = router.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = pulse_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create repositories
    let voice_session_repo = Arc::new(PgVoiceSessionRepository::new(pool.clone()));
    let message_event_repo = Arc::new(PgMessageEventRepository::new(pool.clone()));
    let voice_connection_repo = Arc::new(PgVoiceConnectionRepository::new(pool.clone()));
    let text_connection_repo = Arc::new(PgTextConnectionRepository::new(pool.clone()));
    let member_stats_repo = Arc::new(PgMemberStatsRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .voice_session_repo(voice_session_repo)
        .message_event_repo(message_event_repo)
        .voice_connection_repo(voice_connection_repo)
        .text_connection_repo(text_connection_repo)
        .member_stats_repo(member_stats_repo)
        .analytics(config.analytics.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
