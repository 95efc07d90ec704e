use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::Role;
use crate::config::{self, ApiConfig};
use crate::handlers::{auth, companies, employees};
use crate::middleware::{authenticate, require_role, RoleSet};
use crate::state::AppState;

/// Mutations on HR records are reserved for administrators; reads are open
/// to any authenticated role.
const ADMIN_ONLY: RoleSet = RoleSet::of(&[Role::Admin]);

/// Assemble the full route table. Built once at startup and never mutated;
/// request tasks share it read-only.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_auth_routes())
        // Protected API
        .merge(protected_routes())
        .with_state(state);

    let cfg = config::config();
    let router = if cfg.api.enable_cors {
        router.layer(cors_layer(&cfg.api))
    } else {
        router
    };

    if cfg.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn public_auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(auth::login))
}

/// Everything under the auth guard. The guard layer is added after the
/// per-route role layers, so it wraps them and runs first: authenticate,
/// then (where declared) the role check, then the handler.
fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .merge(company_routes())
        .merge(employee_routes())
        .route_layer(middleware::from_fn(authenticate))
}

fn company_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/api/companies", get(companies::list))
        .route("/api/companies/:id", get(companies::get));

    let write = Router::new()
        .route("/api/companies", post(companies::create))
        .route(
            "/api/companies/:id",
            patch(companies::update).delete(companies::remove),
        )
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role));

    read.merge(write)
}

fn employee_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/api/employees", get(employees::list))
        .route("/api/employees/:id", get(employees::get));

    let write = Router::new()
        .route("/api/employees", post(employees::create))
        .route(
            "/api/employees/:id",
            patch(employees::update).delete(employees::remove),
        )
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_role));

    read.merge(write)
}

fn cors_layer(api: &ApiConfig) -> CorsLayer {
    if api.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "HRM API",
            "version": version,
            "description": "HR management backend API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "/auth/login (public - token acquisition)",
                "whoami": "/api/auth/whoami (protected)",
                "companies": "/api/companies[/:id] (protected; mutations admin-only)",
                "employees": "/api/employees[/:id] (protected; mutations admin-only)",
            },
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
