//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (auth, logging, compression, etc.)
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{jwt_auth, log_requests, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{auth, chat, health, lessons, parents, sessions, users};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Public routes: /, /health, /ready, /auth/* (no token required)
/// - Protected routes: All /api/v1/* endpoints (bearer token required)
///
/// Middleware stack (applied in reverse order):
/// 1. Request ID tracking
/// 2. Request logging
/// 3. Timeout handling
/// 4. Compression
/// 5. CORS
/// 6. Bearer-token authentication (protected routes only)
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    // Public routes (no token required)
    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login));

    // Protected routes (require bearer token)
    let protected_routes = Router::new()
        // Users
        .route("/api/v1/users/me", get(users::me))
        // Lessons
        .route("/api/v1/lessons", post(lessons::create_lesson))
        .route("/api/v1/lessons", get(lessons::list_lessons))
        .route("/api/v1/lessons/{lesson_id}", get(lessons::get_lesson))
        .route("/api/v1/lessons/{lesson_id}", put(lessons::update_lesson))
        .route("/api/v1/lessons/{lesson_id}", delete(lessons::delete_lesson))
        // Reading sessions
        .route("/api/v1/sessions", post(sessions::submit_session))
        .route("/api/v1/sessions/{session_id}", get(sessions::get_session))
        .route("/api/v1/sessions/user/{user_id}", get(sessions::user_sessions))
        // Parents
        .route(
            "/api/v1/parents/{parent_id}/students/{student_id}",
            post(parents::link_student),
        )
        .route(
            "/api/v1/parents/{parent_id}/students",
            get(parents::linked_students),
        )
        .route(
            "/api/v1/parents/students/{student_id}/progress",
            get(parents::student_progress),
        )
        // Chat
        .route("/api/v1/chat", post(chat::chat))
        // Add auth middleware
        .layer(from_fn_with_state(state.clone(), jwt_auth));

    // Combine routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(state.config.timeout_secs),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the LexiLearn HTTP server
///
/// Initializes structured logging, builds the shared state and router,
/// binds the configured TCP address, and serves until SIGTERM or Ctrl+C.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    // Create server state
    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = build_router(state);

    // Parse bind address
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting LexiLearn server on {addr}");
    tracing::info!(
        "Timeout: {}s, Max body: {}MB, Rate limit: {} requests/minute",
        config.timeout_secs,
        config.max_body_size_mb,
        config.rate_limit_per_minute
    );
    tracing::info!(
        "CORS: {}, Chat relay: {}",
        config.enable_cors,
        config.chat_api_url.is_some()
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
