use crate::error::ServerResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Lesson creation request
#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_reading_level")]
    pub reading_level: String,
}

/// Partial lesson update; absent fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateLessonRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reading_level: Option<String>,
}

fn default_reading_level() -> String {
    "basic".to_string()
}

/// Create a lesson
pub async fn create_lesson(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLessonRequest>,
) -> ServerResult<impl IntoResponse> {
    let lesson = state
        .store
        .create_lesson(request.title, request.content, request.reading_level);
    tracing::info!(lesson_id = lesson.id, "lesson created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": lesson.id, "message": "Lesson created successfully" })),
    ))
}

/// List all lessons
pub async fn list_lessons(State(state): State<Arc<AppState>>) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({ "lessons": state.store.lessons() })))
}

/// Fetch one lesson by id
pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(lesson_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let lesson = state.store.lesson(lesson_id)?;
    Ok(Json(json!({ "lesson": lesson })))
}

/// Apply a partial update to a lesson
pub async fn update_lesson(
    State(state): State<Arc<AppState>>,
    Path(lesson_id): Path<u64>,
    Json(request): Json<UpdateLessonRequest>,
) -> ServerResult<impl IntoResponse> {
    state.store.update_lesson(
        lesson_id,
        request.title,
        request.content,
        request.reading_level,
    )?;
    Ok(Json(json!({ "message": "Lesson updated successfully" })))
}

/// Delete a lesson
pub async fn delete_lesson(
    State(state): State<Arc<AppState>>,
    Path(lesson_id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    state.store.delete_lesson(lesson_id)?;
    Ok(Json(json!({ "message": "Lesson deleted successfully" })))
}
