mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::{middleware, routing::get, Router};
use serde_json::json;
use tower::ServiceExt;

use hrm_api::auth::Role;
use hrm_api::middleware::{require_role, RoleSet};

#[tokio::test]
async fn health_is_public() -> Result<()> {
    let app = common::spawn_app().await;

    let (status, body) = app.request("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> Result<()> {
    let app = common::spawn_app().await;

    let (status, body) = app.request("GET", "/api/companies", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() -> Result<()> {
    let app = common::spawn_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/companies")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
        .body(Body::empty())?;
    let response = app.router.clone().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let app = common::spawn_app().await;

    let (status, _) = app
        .request("GET", "/api/companies", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let app = common::spawn_app().await;
    let token = common::expired_token(Role::Admin);

    let (status, body) = app
        .request("GET", "/api/companies", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
    Ok(())
}

#[tokio::test]
async fn whoami_echoes_identity() -> Result<()> {
    let app = common::spawn_app().await;
    let token = common::token_for(Role::Manager);

    let (status, body) = app
        .request("GET", "/api/auth/whoami", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], json!("MANAGER"));
    assert_eq!(body["data"]["username"], json!("manager"));
    Ok(())
}

#[tokio::test]
async fn login_issues_a_usable_token() -> Result<()> {
    let app = common::spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "root", "password": "root-pw" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], json!("ADMIN"));
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = app
        .request("GET", "/api/auth/whoami", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], json!("root"));
    assert_eq!(body["data"]["role"], json!("ADMIN"));
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> Result<()> {
    let app = common::spawn_app().await;

    let (status, body) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "root", "password": "wrong" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
    Ok(())
}

#[tokio::test]
async fn login_with_missing_fields_is_bad_request() -> Result<()> {
    let app = common::spawn_app().await;

    let (status, _) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "root" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

// A role guard reached without the auth guard ahead of it is a wiring bug,
// reported as a server error rather than blamed on the client.
#[tokio::test]
async fn role_check_without_auth_guard_is_a_server_error() -> Result<()> {
    let misconfigured = Router::new()
        .route("/records", get(|| async { "unreachable" }))
        .route_layer(middleware::from_fn_with_state(
            RoleSet::of(&[Role::Admin]),
            require_role,
        ));

    let response = misconfigured
        .oneshot(Request::builder().uri("/records").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
