use crate::error::{ServerError, ServerResult};
use crate::routes::UserOut;
use crate::state::AppState;
use crate::store::Role;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Link a student account to a parent account
pub async fn link_student(
    State(state): State<Arc<AppState>>,
    Path((parent_id, student_id)): Path<(u64, u64)>,
) -> ServerResult<impl IntoResponse> {
    let parent = state.store.user(parent_id)?;
    if parent.role != Role::Parent {
        return Err(ServerError::Forbidden(
            "linked account must have the parent role".into(),
        ));
    }
    // Student must exist; any role may be observed by a parent.
    state.store.user(student_id)?;

    state.store.link_student(parent_id, student_id);
    tracing::info!(parent_id, student_id, "parent link created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Student linked successfully" })),
    ))
}

/// Students linked to a parent
pub async fn linked_students(
    State(state): State<Arc<AppState>>,
    Path(parent_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    state.store.user(parent_id)?;
    let students: Vec<UserOut> = state
        .store
        .students_of(parent_id)
        .into_iter()
        .map(UserOut::from)
        .collect();
    Ok(Json(json!({ "students": students })))
}

/// Progress roll-up for one student: every session plus averages
pub async fn student_progress(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let sessions = state.store.sessions_for_user(student_id);
    if sessions.is_empty() {
        return Err(ServerError::NotFound("Progress"));
    }

    let count = sessions.len() as f64;
    let avg_accuracy = sessions.iter().map(|s| s.accuracy).sum::<f64>() / count;
    let avg_wpm = sessions.iter().map(|s| s.wpm as f64).sum::<f64>() / count;

    Ok(Json(json!({
        "sessions": sessions,
        "avg_accuracy": avg_accuracy,
        "avg_wpm": avg_wpm,
    })))
}
