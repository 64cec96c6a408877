//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the
//! LexiLearn server. Routes are organized by functionality:
//!
//! - `health`: Health checks and readiness
//! - `auth`: Signup and login
//! - `users`: Authenticated user profile
//! - `lessons`: Lesson CRUD
//! - `sessions`: Reading-session submission and lookup
//! - `parents`: Parent/student links and progress
//! - `chat`: Relay to the external reply provider

pub mod auth;
pub mod chat;
pub mod health;
pub mod lessons;
pub mod parents;
pub mod sessions;
pub mod users;

use crate::error::{ServerError, ServerResult};
use crate::store::{Role, User};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Client-facing projection of a user account. Never carries the
/// password hash.
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: u64,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }
    }
}

/// API version and base info
///
/// Root endpoint (GET /), no authentication required.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "LexiLearn API",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/auth/signup",
            "/auth/login",
            "/api/v1/users/me",
            "/api/v1/lessons",
            "/api/v1/sessions",
            "/api/v1/parents/{parent_id}/students",
            "/api/v1/chat",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound("Route")
}
