use hrm_api::app::app;
use hrm_api::config;
use hrm_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECURITY_JWT_SECRET etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting HRM API in {:?} mode", config.environment);

    let state = AppState::new();
    state.seed_bootstrap_admin().await;

    let app = app(state);

    // Allow tests or deployments to override the port via env
    let port = std::env::var("HRM_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3001);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("HRM API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
