use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hrm_api::app::app;
use hrm_api::auth::{generate_jwt, Claims, Role};
use hrm_api::models::Account;
use hrm_api::state::AppState;

/// In-process application under test: the real router over a fresh state,
/// with one admin and one employee login seeded.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    let state = AppState::new();
    state
        .accounts
        .insert(Account::new("root", "root-pw", Role::Admin))
        .await;
    state
        .accounts
        .insert(Account::new("clerk", "clerk-pw", Role::Employee))
        .await;

    TestApp {
        router: app(state.clone()),
        state,
    }
}

/// Mint a valid token directly, bypassing the login endpoint.
pub fn token_for(role: Role) -> String {
    let claims = Claims::new(
        format!("{}-subject", role),
        role.as_str().to_lowercase(),
        role,
    );
    generate_jwt(claims).expect("dev config provides a JWT secret")
}

/// Mint a token whose expiry is well past the validation leeway.
pub fn expired_token(role: Role) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "expired-subject".to_string(),
        username: "expired".to_string(),
        role,
        exp: now - 7200,
        iat: now - 10_800,
    };
    generate_jwt(claims).expect("dev config provides a JWT secret")
}

impl TestApp {
    /// Send one request through the router and decode the JSON body.
    /// An empty body (204) decodes to `Value::Null`.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request build"),
            None => builder.body(Body::empty()).expect("request build"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        (status, json)
    }
}
