//! API routes for hr-server

pub mod documents;
pub mod employees;
pub mod extract;
pub mod health;

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::identity_middleware;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the full application router
pub fn router(state: AppState) -> Router {
    // Documents and employees (bearer token required)
    let authed = Router::new()
        .route(
            "/documents",
            get(documents::list_all)
                .post(documents::create)
                .put(documents::update),
        )
        .route("/documents/bulk", post(documents::bulk_create))
        // GET takes an employee id, DELETE a document id
        .route(
            "/documents/{id}",
            get(documents::list_by_employee).delete(documents::delete),
        )
        .route(
            "/employees",
            get(employees::list_active).post(employees::create),
        )
        .route("/employees/team/{manager_id}", get(employees::list_team))
        .route("/employees/terminated", get(employees::list_terminated))
        .route(
            "/employees/terminated/{id}",
            delete(employees::delete_terminated),
        )
        .route(
            "/employees/terminated/{id}/reregister",
            post(employees::reregister),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(authed)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
