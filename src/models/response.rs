use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Every response leaves the service as JSON, either a payload or an
/// `{"error": message}` body.
#[derive(Debug, Clone)]
pub enum CustomResponse<T> {
    Api(ApiResponse<T>),
    Error(ErrorResponse),
}

impl<T> CustomResponse<T>
where
    T: Serialize,
{
    pub fn api(status: StatusCode, data: T) -> Self {
        CustomResponse::Api(ApiResponse { status, data })
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        CustomResponse::Error(ErrorResponse::new(status, message))
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ErrorResponse {
    status: StatusCode,
    body: ErrorBody,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.to_string(),
            },
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl<T> From<ErrorResponse> for CustomResponse<T>
where
    T: Serialize,
{
    fn from(error_response: ErrorResponse) -> Self {
        CustomResponse::Error(error_response)
    }
}

impl<T> IntoResponse for CustomResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match self {
            CustomResponse::Api(api_response) => api_response.into_response(),
            CustomResponse::Error(error_response) => error_response.into_response(),
        }
    }
}
