use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing, Json, Router,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::{AppError, AppState, Credentials, CustomResponse};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/token", routing::post(issue_token))
}

pub async fn issue_token(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<CustomResponse<Value>, AppError> {
    let Json(credentials) = payload.map_err(|e| {
        warn!("Rejected token request body: {}", e);
        AppError::invalid_payload()
    })?;

    let role = app_state
        .credentials
        .check(&credentials.username, &credentials.password)
        .inspect_err(|_| warn!("Invalid credentials for {:?}", credentials.username))?;

    let token = app_state.issuer.issue(&credentials.username, role)?;
    info!("Token issued to {} ({})", credentials.username, role);

    Ok(CustomResponse::api(
        StatusCode::OK,
        serde_json::json!({ "token": token }),
    ))
}
