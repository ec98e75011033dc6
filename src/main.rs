use anyhow::Context;
use std::{env::var, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{StaticCredentials, SystemClock};
use crate::models::AppState;
use crate::system::{Config, SqliteProducts};

mod api;
mod auth;
mod models;
mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_level = var("RUST_LOG").unwrap_or("info".to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Log level: {log_level}");

    let config = Config::from_env()?;
    info!("DB url: {}", config.database_url);

    let pool = system::connect(&config.database_url).await?;
    system::init_db(&pool).await?;

    let state = Arc::new(AppState::new(
        &config.secret,
        Arc::new(SqliteProducts::new(pool.clone())),
        Arc::new(StaticCredentials::default()),
        Arc::new(SystemClock),
    ));

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Products API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(system::shutdown_signal(pool))
        .await?;

    Ok(())
}
