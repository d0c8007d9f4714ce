//! HTTP surface for the task list.
//!
//! # Responsibility
//! - Map browser form flows and JSON requests onto `TaskStore` calls.
//! - Decide presentation: redirects with notices, HTML pages, JSON bodies.
//!
//! # Invariants
//! - Validation and not-found failures never surface as 5xx.
//! - Storage failures become a generic 500 and are logged, never echoed.
//! - Store calls run off the async workers via `spawn_blocking`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notice;
pub mod render;
pub mod state;

pub use error::{AppError, ErrorFormat};
pub use state::AppState;

use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tasklist_core::TaskStore;

/// Builds the full application router around one shared store.
pub fn router(store: Arc<TaskStore>) -> Router {
    Router::new()
        // Browser pages
        .route("/", get(handlers::pages::index))
        .route("/add", post(handlers::pages::add_task))
        .route("/toggle/{id}", get(handlers::pages::toggle_task))
        .route("/delete/{id}", get(handlers::pages::delete_task))
        .route(
            "/edit/{id}",
            get(handlers::pages::edit_form).post(handlers::pages::submit_edit),
        )
        .route("/stats", get(handlers::pages::stats))
        // JSON API
        .route(
            "/api/todos",
            get(handlers::api::list_tasks).post(handlers::api::create_task),
        )
        .route("/api/todos/{id}", delete(handlers::api::delete_task))
        .route("/api/stats", get(handlers::api::stats))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(AppState::new(store))
}
