use crate::models::{AppError, AppState, CustomResponse};
use axum::{extract::State, http::StatusCode, routing, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", routing::get(check_health))
}

async fn check_health(
    State(app_state): State<Arc<AppState>>,
) -> Result<CustomResponse<Value>, AppError> {
    if let Err(e) = app_state.products.ping().await {
        error!("Health check failed: {}", e);
        return Err(AppError::Unavailable("Database not available".to_string()));
    }

    Ok(CustomResponse::api(
        StatusCode::OK,
        json!({
            "status": "UP",
            "checks": [{ "name": "database", "status": "UP" }],
        }),
    ))
}
