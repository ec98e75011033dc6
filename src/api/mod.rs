mod guard;
mod health;
mod product;
mod token;

use axum::{http::StatusCode, response::IntoResponse, Router};
use std::sync::Arc;

use crate::models::{AppState, CustomResponse};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(token::router())
        .merge(product::router(&state))
        .fallback(fallback_404)
        .method_not_allowed_fallback(fallback_405)
        .with_state(state)
}

pub async fn fallback_404() -> impl IntoResponse {
    CustomResponse::<()>::error(StatusCode::NOT_FOUND, "Not found")
}

pub async fn fallback_405() -> impl IntoResponse {
    CustomResponse::<()>::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}


#[cfg(test)]
mod tests {
    use super::test_support::{app, send, test_state};
    use crate::models::ErrorBody;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (status, body) = send(&app(test_state()), "GET", "/nowhere", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: ErrorBody = serde_json::from_value(body).unwrap();
        assert_eq!(body.error, "Not found");
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() {
        let (status, body) = send(&app(test_state()), "PATCH", "/product/1", None, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }
}
