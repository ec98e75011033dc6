use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::CustomResponse;

/// Failures of the authentication layer. All of them are terminal for the
/// request that raised them.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token provided")]
    NoToken,
    #[error("token could not be decoded")]
    MalformedToken,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token header advertises a non-HMAC algorithm")]
    UnsupportedAlgorithm,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message sent to the client. Every verification failure collapses to
    /// the same text.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::MalformedToken
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::UnsupportedAlgorithm => "Invalid token".to_string(),
            other => other.to_string(),
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::NoToken => "no_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "expired",
            AuthError::UnsupportedAlgorithm => "unsupported_algorithm",
            AuthError::Forbidden => "forbidden",
            AuthError::Signing(_) => "signing",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        CustomResponse::<()>::error(self.status(), &self.public_message()).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Unavailable(String),
}

// Repository messages reach the client as-is.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Auth(err) => return err.into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => {
                error!("Upstream failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        CustomResponse::<()>::error(status, &message).into_response()
    }
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        AppError::BadRequest(msg.to_string())
    }

    pub fn invalid_payload() -> Self {
        AppError::bad_request("Invalid request payload")
    }

    pub fn invalid_product_id() -> Self {
        AppError::bad_request("Invalid product ID")
    }

    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failures_share_one_message() {
        for err in [
            AuthError::MalformedToken,
            AuthError::BadSignature,
            AuthError::Expired,
            AuthError::UnsupportedAlgorithm,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.public_message(), "Invalid token");
        }
    }

    #[test]
    fn insufficient_role_is_unauthorized() {
        assert_eq!(AuthError::Forbidden.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.public_message(), "Insufficient permissions");
        assert_eq!(AuthError::NoToken.public_message(), "No token provided");
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "Invalid credentials"
        );
    }

    #[test]
    fn every_app_error_has_its_status() {
        let cases = [
            (AppError::invalid_payload(), StatusCode::BAD_REQUEST),
            (AppError::not_found("Product not found"), StatusCode::NOT_FOUND),
            (AppError::from(AuthError::Forbidden), StatusCode::UNAUTHORIZED),
            (AppError::Upstream("db".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Unavailable("down".to_string()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn upstream_error_keeps_message() {
        let response = AppError::from(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], sqlx::Error::RowNotFound.to_string());
    }
}
