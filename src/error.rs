// HTTP API Error Types
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::format::{ResponseFormat, XML_CONTENT_TYPE};
use crate::services::ServiceError;
use crate::validation::FieldErrors;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: FieldErrors,
    },
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::ValidationError { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self.field_errors() {
            Some(field_errors) => json!({
                "error": true,
                "message": self.message(),
                "code": self.error_code(),
                "field_errors": field_errors,
            }),
            None => json!({
                "error": true,
                "message": self.message(),
                "code": self.error_code(),
            }),
        }
    }

    /// Convert to XML response body rooted at `<error>`
    pub fn to_xml(&self) -> Result<String, String> {
        ResponseFormat::Xml.encode(&XmlErrorBody {
            message: self.message(),
            code: self.error_code(),
            field_errors: self.field_errors(),
        })
    }

    /// Render in the format the client negotiated
    pub fn render(self, format: ResponseFormat) -> Response {
        let status = self.status_code();
        if format == ResponseFormat::Xml {
            match self.to_xml() {
                Ok(body) => return (status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response(),
                Err(e) => tracing::error!("Failed to serialize error body as XML: {}", e),
            }
        }
        (status, Json(self.to_json())).into_response()
    }
}

#[derive(Serialize)]
#[serde(rename = "error")]
struct XmlErrorBody<'a> {
    message: &'a str,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<&'a FieldErrors>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(field_errors) => {
                ApiError::validation_error("Invalid field values", field_errors)
            }
            ServiceError::NotFound => ApiError::not_found("Record not found"),
            ServiceError::Database(e) => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", e);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(ResponseFormat::Json)
    }
}
