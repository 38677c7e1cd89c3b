//! balcao-server — Order intake backend for small merchants
//!
//! Long-running HTTP service that:
//! - Serves the public storefront API (schedule, pickup windows, delivery
//!   check, order placement) keyed by store slug
//! - Serves the merchant admin API (order review, pickup slots, operating
//!   schedule, delivery areas) behind JWT authentication
//! - Owns the PostgreSQL schema via embedded migrations

mod api;
mod auth;
mod config;
mod db;
mod delivery;
mod orders;
mod scheduling;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "balcao_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting balcao-server (env: {})", config.environment);

    // Initialize application state (pool + migrations)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("balcao-server listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
