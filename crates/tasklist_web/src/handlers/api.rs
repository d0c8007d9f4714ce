//! JSON API under `/api`.

use crate::error::{AppError, ErrorFormat};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tasklist_core::{
    validate_task_text, NewTask, Task, TaskId, TaskServiceError, TaskStats, TaskValidationError,
};

/// Body accepted by `POST /api/todos`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub task: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: TaskId,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/todos
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state
        .call(|store| store.list())
        .await
        .map_err(AppError::as_json)?
        .map_err(|err| AppError::from(err).as_json())?;
    Ok(Json(tasks))
}

/// POST /api/todos
///
/// A missing or unparsable body is reported the same way as a missing task.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let request = body.map_err(|_| task_required())?.0;
    let text = request.task.unwrap_or_default();
    match validate_task_text(&text) {
        Ok(()) => {}
        Err(TaskValidationError::Empty) => return Err(task_required()),
        Err(TaskValidationError::TooLong { .. }) => {
            return Err(bad_request("Task too long"));
        }
    }

    let new_task = NewTask {
        task: text,
        priority: request.priority,
    };
    let created = state
        .call(move |store| store.create(&new_task))
        .await
        .map_err(AppError::as_json)?
        .map_err(|err| AppError::from(err).as_json())?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: created.id,
            message: "Task created successfully".to_string(),
        }),
    ))
}

/// DELETE /api/todos/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Ok(Path(id)) = path else {
        return Err(task_not_found());
    };
    let result = state
        .call(move |store| store.delete(id))
        .await
        .map_err(AppError::as_json)?;

    match result {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Task deleted successfully".to_string(),
        })),
        Err(err) if matches!(err.as_task_error(), Some(TaskServiceError::NotFound(_))) => {
            Err(task_not_found())
        }
        Err(err) => Err(AppError::from(err).as_json()),
    }
}

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<TaskStats>, AppError> {
    let stats = state
        .call(|store| store.stats())
        .await
        .map_err(AppError::as_json)?
        .map_err(|err| AppError::from(err).as_json())?;
    Ok(Json(stats))
}

fn task_required() -> AppError {
    bad_request("Task is required")
}

fn task_not_found() -> AppError {
    AppError::new(StatusCode::NOT_FOUND, "Task not found", ErrorFormat::Json)
}

fn bad_request(message: &str) -> AppError {
    AppError::new(StatusCode::BAD_REQUEST, message, ErrorFormat::Json)
}
