use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use service::handler::{ApiResponse, RESPONSE_HEADERS};
use thiserror::Error;

/// Axum rendering of a handler response: status, JSON body and the fixed
/// CORS/content-type headers.
#[derive(Debug)]
pub struct ApiReply(pub ApiResponse);

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let resp = self.0;
        let mut out = (resp.status, resp.body_string()).into_response();
        let headers = out.headers_mut();
        for (name, value) in RESPONSE_HEADERS {
            // from_bytes 会统一转为小写
            if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
                headers.insert(name, HeaderValue::from_static(value));
            }
        }
        out
    }
}

/// Error raised by the HTTP layer itself, outside the resource handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn resource_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Resource not found")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiReply(ApiResponse::error(self.status, self.message)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("store initialization failed: {0}")]
    Store(#[from] service::errors::ServiceError),
}
