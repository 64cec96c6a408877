use crate::auth::AuthUser;
use crate::error::ServerResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Reading-session submission
#[derive(Debug, Deserialize)]
pub struct SubmitSessionRequest {
    pub lesson_id: u64,
    pub spoken_text: String,
}

/// Score a reading attempt and persist the session.
///
/// The lesson content is the reference text; the scorer and the fluency
/// estimator run over the submitted transcript and the combined metrics
/// are stored for the authenticated user.
pub async fn submit_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<SubmitSessionRequest>,
) -> ServerResult<impl IntoResponse> {
    let lesson = state.store.lesson(request.lesson_id)?;

    let result = lexilearn::score(&request.spoken_text, &lesson.content);
    let wpm = lexilearn::estimate_wpm(&request.spoken_text);

    let session = state.store.create_session(
        auth.user_id,
        lesson.id,
        request.spoken_text,
        wpm,
        &result,
    );

    tracing::info!(
        session_id = session.id,
        user_id = auth.user_id,
        lesson_id = lesson.id,
        accuracy = result.accuracy,
        wpm,
        "reading session scored"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": session.id,
            "message": "Reading session analyzed successfully",
            "metrics": {
                "wpm": wpm,
                "accuracy": result.accuracy,
                "error_words": result.error_words,
                "recommendation": result.recommendation,
            }
        })),
    ))
}

/// Fetch one session by id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let session = state.store.session(session_id)?;
    Ok(Json(json!({ "session": session })))
}

/// All sessions recorded for a user
pub async fn user_sessions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({ "sessions": state.store.sessions_for_user(user_id) })))
}
