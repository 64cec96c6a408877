use crate::auth::AuthUser;
use crate::error::{ServerError, ServerResult};
use crate::routes::UserOut;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

/// Profile of the authenticated user
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> ServerResult<impl IntoResponse> {
    let user = state
        .store
        .user(auth.user_id)
        .map_err(|_| ServerError::Authentication("user no longer exists".into()))?;
    Ok(Json(UserOut::from(user)))
}
