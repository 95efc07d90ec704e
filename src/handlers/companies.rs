use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Company, CompanyCreate, CompanyPatch};
use crate::state::AppState;

/// GET /api/companies - all records, insertion order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Company>> {
    Ok(ApiResponse::success(state.companies.list().await))
}

/// GET /api/companies/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Company> {
    let record = state.companies.find(&id).await?;
    Ok(ApiResponse::success(record))
}

/// POST /api/companies
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Company> {
    let create = CompanyCreate::parse(payload)?;
    let record = state.companies.insert(create.into_record()).await;

    tracing::info!(id = %record.id, "company created");
    Ok(ApiResponse::created(record))
}

/// PATCH /api/companies/:id - merge semantics: fields absent from the body
/// keep their stored values
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Company> {
    let patch = CompanyPatch::parse(payload)?;
    let record = state
        .companies
        .update(&id, |record| patch.apply_to(record))
        .await?;

    tracing::info!(id = %record.id, "company updated");
    Ok(ApiResponse::success(record))
}

/// DELETE /api/companies/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.companies.remove(&id).await?;

    tracing::info!(id = %id, "company deleted");
    Ok(ApiResponse::no_content())
}
