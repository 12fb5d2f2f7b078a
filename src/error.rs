// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body: `{"error": "<message>"}`
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        // Log the real cause; callers only ever see the fixed payload.
        tracing::error!("Database error: {}", err);
        ApiError::internal_server_error("Internal Server Error")
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        match err {
            crate::auth::AuthError::MissingCredentials => {
                ApiError::bad_request("Email and password are required")
            }
            crate::auth::AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            crate::auth::AuthError::InvalidSecret | crate::auth::AuthError::TokenGeneration(_) => {
                tracing::error!("Token issue failed: {}", err);
                ApiError::internal_server_error("Login failed")
            }
        }
    }
}

impl From<crate::dashboard::ExportError> for ApiError {
    fn from(err: crate::dashboard::ExportError) -> Self {
        match err {
            crate::dashboard::ExportError::NoData | crate::dashboard::ExportError::EmptyRange => {
                ApiError::not_found(err.to_string())
            }
            other => {
                tracing::error!("Export failed: {}", other);
                ApiError::internal_server_error("Internal Server Error")
            }
        }
    }
}

impl From<crate::dashboard::filter::DateParseError> for ApiError {
    fn from(err: crate::dashboard::filter::DateParseError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
