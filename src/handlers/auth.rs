use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Identity};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login - exchange credentials for a bearer token
///
/// The response deliberately does not say whether the username or the
/// password was wrong.
pub async fn login(State(state): State<AppState>, Json(payload): Json<Value>) -> ApiResult<Value> {
    let request: LoginRequest = serde_json::from_value(payload)
        .map_err(|_| ApiError::bad_request("username and password are required"))?;

    let account = state
        .accounts
        .authenticate(&request.username, &request.password)
        .await
        .ok_or_else(|| {
            tracing::warn!(username = %request.username, "login rejected");
            ApiError::unauthorized("invalid username or password")
        })?;

    let claims = Claims::new(account.id.clone(), account.username.clone(), account.role);
    let token = generate_jwt(claims).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("failed to issue token")
    })?;

    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    tracing::info!(username = %account.username, role = %account.role, "login succeeded");

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": account.id,
            "username": account.username,
            "role": account.role,
        },
        "expires_in": expires_in,
    })))
}

/// GET /api/auth/whoami - echo the identity attached by the auth guard
pub async fn whoami(Extension(identity): Extension<Identity>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": identity.subject,
        "username": identity.username,
        "role": identity.role,
    })))
}
