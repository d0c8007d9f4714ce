//! Browser routes: list, add, toggle, delete, edit and stats pages.
//!
//! Mutations answer with a 303 redirect to `/` carrying a notice. The one
//! exception is a rejected edit, which re-renders the form in place. An id
//! that is not an integer names no task and gets the not-found notice.

use crate::error::AppError;
use crate::notice::{redirect_home, NoticeQuery};
use crate::render;
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tasklist_core::{NewTask, StoreError, TaskId, TaskOutcome, TaskServiceError, TaskUpdate};

/// Fields posted by the add and edit forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskForm {
    pub task: Option<String>,
    pub priority: Option<String>,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let tasks = state.call(|store| store.list()).await??;
    let notice = query.into_outcome();
    Ok(Html(render::index_page(&tasks, notice.as_ref())))
}

/// POST /add
pub async fn add_task(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Response, AppError> {
    let new_task = NewTask {
        task: form.task.unwrap_or_default(),
        priority: form.priority,
    };

    let outcome = match state.call(move |store| store.create(&new_task)).await? {
        Ok(_) => TaskOutcome::created(),
        Err(err) => notice_or_fail(err)?,
    };
    Ok(redirect_home(&outcome).into_response())
}

/// GET /toggle/{id}
pub async fn toggle_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<Response, AppError> {
    let Ok(Path(id)) = path else {
        return Ok(missing_task());
    };
    let outcome = match state.call(move |store| store.toggle(id)).await? {
        Ok(task) => TaskOutcome::toggled(&task),
        Err(err) => notice_or_fail(err)?,
    };
    Ok(redirect_home(&outcome).into_response())
}

/// GET /delete/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<Response, AppError> {
    let Ok(Path(id)) = path else {
        return Ok(missing_task());
    };
    let outcome = match state.call(move |store| store.delete(id)).await? {
        Ok(()) => TaskOutcome::deleted(),
        Err(err) => notice_or_fail(err)?,
    };
    Ok(redirect_home(&outcome).into_response())
}

/// GET /edit/{id}
pub async fn edit_form(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> Result<Response, AppError> {
    let Ok(Path(id)) = path else {
        return Ok(missing_task());
    };
    match state.call(move |store| store.get(id)).await? {
        Ok(task) => Ok(Html(render::edit_page(&task, None, None)).into_response()),
        Err(err) => Ok(redirect_home(&notice_or_fail(err)?).into_response()),
    }
}

/// POST /edit/{id}
pub async fn submit_edit(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
    Form(form): Form<TaskForm>,
) -> Result<Response, AppError> {
    let Ok(Path(id)) = path else {
        return Ok(missing_task());
    };
    let update = TaskUpdate::new(form.task.unwrap_or_default(), form.priority);
    let entered = update.clone();

    match state.call(move |store| store.update(id, &update)).await? {
        Ok(_) => Ok(redirect_home(&TaskOutcome::updated()).into_response()),
        Err(err) => {
            if let Some(TaskServiceError::UpdateRejected { current, error }) = err.as_task_error() {
                let notice = TaskOutcome::error(error.to_string());
                let page = render::edit_page(
                    current,
                    Some((entered.task.as_str(), entered.priority.as_deref())),
                    Some(&notice),
                );
                return Ok(Html(page).into_response());
            }
            Ok(redirect_home(&notice_or_fail(err)?).into_response())
        }
    }
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stats = state.call(|store| store.stats()).await??;
    Ok(Html(render::stats_page(&stats)))
}

fn missing_task() -> Response {
    redirect_home(&TaskOutcome::not_found()).into_response()
}

/// Turns a domain failure into a notice; storage failures stay errors.
fn notice_or_fail(err: StoreError) -> Result<TaskOutcome, AppError> {
    match err {
        StoreError::Task(task_err) if !matches!(task_err, TaskServiceError::Repo(_)) => {
            Ok(TaskOutcome::from_error(&task_err))
        }
        other => Err(other.into()),
    }
}
