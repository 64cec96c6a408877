use crate::auth::{create_token, hash_password, verify_password};
use crate::error::{ServerError, ServerResult};
use crate::routes::UserOut;
use crate::state::AppState;
use crate::store::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Register a new account
///
/// Duplicate emails are rejected with 409; the original stores only one
/// account per address.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> ServerResult<impl IntoResponse> {
    let email = request.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(ServerError::BadRequest("invalid email address".into()));
    }
    if request.password.is_empty() {
        return Err(ServerError::BadRequest("password must not be empty".into()));
    }

    let user = state.store.create_user(
        email,
        hash_password(&request.password),
        request.full_name,
        request.role.unwrap_or_default(),
    )?;

    tracing::info!(user_id = user.id, role = ?user.role, "account created");
    Ok((StatusCode::CREATED, Json(UserOut::from(user))))
}

/// Exchange credentials for an access token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<impl IntoResponse> {
    let email = request.email.trim().to_lowercase();

    // Same failure for unknown email and wrong password; no account probing.
    let user = state
        .store
        .user_by_email(&email)
        .map_err(|_| ServerError::Authentication("invalid email or password".into()))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(ServerError::Authentication(
            "invalid email or password".into(),
        ));
    }

    let access_token = create_token(&state.config, &user)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
