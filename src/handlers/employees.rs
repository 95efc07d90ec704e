use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Employee, EmployeeCreate, EmployeePatch};
use crate::state::AppState;

/// GET /api/employees - all records, insertion order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    Ok(ApiResponse::success(state.employees.list().await))
}

/// GET /api/employees/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Employee> {
    let record = state.employees.find(&id).await?;
    Ok(ApiResponse::success(record))
}

/// POST /api/employees
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Employee> {
    let create = EmployeeCreate::parse(payload)?;
    let record = state.employees.insert(create.into_record()).await;

    tracing::info!(id = %record.id, "employee created");
    Ok(ApiResponse::created(record))
}

/// PATCH /api/employees/:id - partial update, absent fields unchanged
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Employee> {
    let patch = EmployeePatch::parse(payload)?;
    let record = state
        .employees
        .update(&id, |record| patch.apply_to(record))
        .await?;

    tracing::info!(id = %record.id, "employee updated");
    Ok(ApiResponse::success(record))
}

/// DELETE /api/employees/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.employees.remove(&id).await?;

    tracing::info!(id = %id, "employee deleted");
    Ok(ApiResponse::no_content())
}
