//! Employee handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError};
use shared::models::{CreateEmployeeRequest, Employee};
use shared::policy::Capability;

use super::extract::Payload;
use crate::auth::{Identity, require};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// `GET /employees`
pub async fn list_active(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    Ok(Json(state.employees.list_active().await?))
}

/// `GET /employees/team/{manager_id}`
pub async fn list_team(
    State(state): State<AppState>,
    Path(manager_id): Path<i64>,
) -> ApiResult<Vec<Employee>> {
    Ok(Json(state.employees.list_team(manager_id).await?))
}

/// `GET /employees/terminated` (admin)
pub async fn list_terminated(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<Employee>> {
    require(&identity, Capability::ViewTerminated)?;
    Ok(Json(state.employees.list_terminated().await?))
}

/// `POST /employees` (admin)
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Payload(body): Payload<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Employee>>), AppError> {
    require(&identity, Capability::AddEmployee)?;

    let inputs = &body.inputs;
    if inputs.first_name.trim().is_empty() {
        return Err(AppError::missing_field("firstName"));
    }
    if inputs.last_name.trim().is_empty() {
        return Err(AppError::missing_field("lastName"));
    }
    if inputs.email.trim().is_empty() {
        return Err(AppError::missing_field("email"));
    }

    let created = state.employees.create(inputs).await?;
    tracing::info!(
        emp_id = created.emp_id,
        frontend_url = body.frontend_url.as_deref().unwrap_or_default(),
        "Employee created"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// `DELETE /employees/terminated/{id}` (admin)
pub async fn delete_terminated(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(emp_id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    require(&identity, Capability::ViewTerminated)?;
    state.employees.delete_terminated(emp_id).await?;
    tracing::info!(emp_id, "Terminated employee removed");
    Ok(Json(ApiResponse::message(shared::messages::DELETED)))
}

/// `POST /employees/terminated/{id}/reregister` (admin)
pub async fn reregister(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(emp_id): Path<i64>,
) -> Result<(StatusCode, Json<ApiResponse<Employee>>), AppError> {
    require(&identity, Capability::ReRegister)?;
    let created = state
        .employees
        .reregister(emp_id, chrono::Utc::now(), &state.email_domain)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}
