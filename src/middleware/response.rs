use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::api::format::ResponseFormat;
use crate::error::ApiError;

/// Successful response body, rendered in the negotiated format
#[derive(Debug)]
pub struct ApiResponse {
    pub status_code: StatusCode,
    pub format: ResponseFormat,
    body: Result<Option<String>, String>,
}

impl ApiResponse {
    /// 200 OK with a single value
    pub fn success<T: Serialize>(format: ResponseFormat, data: &T) -> Self {
        Self::with_status(format, StatusCode::OK, data)
    }

    /// 201 Created with the stored value
    pub fn created<T: Serialize>(format: ResponseFormat, data: &T) -> Self {
        Self::with_status(format, StatusCode::CREATED, data)
    }

    pub fn with_status<T: Serialize>(format: ResponseFormat, status_code: StatusCode, data: &T) -> Self {
        Self {
            status_code,
            format,
            body: format.encode(data).map(Some),
        }
    }

    /// 200 OK with a collection wrapped in `root` for XML clients
    pub fn list<T: Serialize>(format: ResponseFormat, root: &str, items: &[T]) -> Self {
        Self {
            status_code: StatusCode::OK,
            format,
            body: format.encode_list(root, items).map(Some),
        }
    }

    /// 204 No Content
    pub fn no_content() -> Self {
        Self {
            status_code: StatusCode::NO_CONTENT,
            format: ResponseFormat::Json,
            body: Ok(None),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            Ok(Some(body)) => (
                self.status_code,
                [(header::CONTENT_TYPE, self.format.content_type())],
                body,
            )
                .into_response(),
            Ok(None) => self.status_code.into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": true,
                        "message": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Error response rendered in the format the client asked for
#[derive(Debug)]
pub struct ApiFailure {
    pub format: ResponseFormat,
    pub error: ApiError,
}

impl ApiFailure {
    pub fn new(format: ResponseFormat, error: impl Into<ApiError>) -> Self {
        Self {
            format,
            error: error.into(),
        }
    }
}

impl From<ApiError> for ApiFailure {
    fn from(error: ApiError) -> Self {
        Self::new(ResponseFormat::Json, error)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        self.error.render(self.format)
    }
}

/// Attach the negotiated format to an error on its way out of a handler
pub trait Negotiate<T> {
    fn negotiated(self, format: ResponseFormat) -> Result<T, ApiFailure>;
}

impl<T, E: Into<ApiError>> Negotiate<T> for Result<T, E> {
    fn negotiated(self, format: ResponseFormat) -> Result<T, ApiFailure> {
        self.map_err(|e| ApiFailure::new(format, e))
    }
}

// Convenience type alias
pub type ApiResult = Result<ApiResponse, ApiFailure>;
