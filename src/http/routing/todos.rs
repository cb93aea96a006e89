use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::Value;

use crate::application::todo_service::TodoService;
use crate::domain::todo::TodoId;
use crate::http::types::{ApiError, OkBody, TodoBody, TodosBody};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(list_todos::<S>).post(add_todo::<S>).delete(clear_todos::<S>).fallback(not_found),
        )
        .route(
            "/api/todos/:id",
            patch(toggle_todo::<S>).delete(remove_todo::<S>).fallback(not_found),
        )
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<TodosBody>, ApiError> {
    let todos = state.service.list().await?;
    Ok(Json(TodosBody { todos }))
}

async fn add_todo<S: TodoService>(State(state): State<AppState<S>>, body: Result<Bytes, BytesRejection>) -> Result<(StatusCode, Json<TodoBody>), ApiError> {
    let title = title_from_body(&body?)?;
    let todo = state.service.add(&title).await?;
    Ok((StatusCode::CREATED, Json(TodoBody { todo })))
}

async fn clear_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<OkBody>, ApiError> {
    state.service.clear().await?;
    Ok(Json(OkBody { ok: true }))
}

async fn toggle_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<TodoBody>, ApiError> {
    let id = parse_id(&id)?;
    match state.service.toggle_done(id).await? {
        Some(todo) => Ok(Json(TodoBody { todo })),
        None => Err(ApiError::NotFound),
    }
}

async fn remove_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<OkBody>, ApiError> {
    let id = parse_id(&id)?;
    if state.service.remove(id).await? { Ok(Json(OkBody { ok: true })) } else { Err(ApiError::NotFound) }
}

pub(crate) async fn not_found() -> ApiError { ApiError::NotFound }

/// Ids are plain digit runs. A digit run too large for an id cannot name a stored todo.
fn parse_id(s: &str) -> Result<TodoId, ApiError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest("invalid id".into()));
    }
    s.parse().map_err(|_| ApiError::NotFound)
}

/// Reads the optional `title` field of a JSON request body.
///
/// An empty body means "no title". Anything that is not a string title (missing field,
/// wrong type, non-object document) also reads as an empty title, which the store rejects.
fn title_from_body(body: &[u8]) -> Result<String, ApiError> {
    let text = std::str::from_utf8(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if text.trim().is_empty() { return Ok(String::new()); }
    let value: Value = serde_json::from_str(text).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(value.get("title").and_then(Value::as_str).unwrap_or_default().to_string())
}
