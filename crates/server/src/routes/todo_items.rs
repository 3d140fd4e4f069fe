use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use models::todo_item::Model;
use service::NewTodoItem;

use crate::errors::ApiError;
use crate::routes::AppState;

/// List all active (not completed) items.
pub async fn list_todo_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<Model>>, ApiError> {
    Ok(Json(state.todos.list().await?))
}

/// Fetch one item by id. Completed items are still addressable here.
pub async fn get_todo_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Model>, ApiError> {
    Ok(Json(state.todos.get(id).await?))
}

/// Full replace of an item. 204 on success.
pub async fn put_todo_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(item): Json<Model>,
) -> Result<StatusCode, ApiError> {
    state.todos.update(id, item).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new item. 201 with the persisted item and a Location header
/// pointing at the get-by-id route.
pub async fn post_todo_item(
    State(state): State<AppState>,
    Json(input): Json<NewTodoItem>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.todos.create(input).await?;
    let location = format!("/api/todo-items/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}
