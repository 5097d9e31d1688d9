use thiserror::Error;
use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

// Import Axum types for HTTP response conversion
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Message(String),
    Single { field: String, message: String },
    Multiple { fields: BTreeMap<String, String> },
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrors::Message(message) => write!(f, "{}", message),
            ValidationErrors::Single { field, message } => write!(f, "{}: {}", field, message),
            ValidationErrors::Multiple { fields } => {
                let joined = fields
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}", joined)
            }
        }
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the MongoDB driver.
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A record could not be converted into a BSON document.
    #[error("BSON encode error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    /// A stored document does not match the expected record shape.
    #[error("BSON decode error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// A validation error with field-level details.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A forbidden error (caller may not act on the resource).
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// The document store is not reachable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error text attached to 5xx responses.
///
/// The body never carries it; `middleware::error_detail` copies it into the
/// body when running in development mode.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl Error {
    /// Shorthand for a validation error on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Single {
            field: field.to_string(),
            message: message.into(),
        })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Mongo(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors are logged at warn, everything else at error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::NotFound(_) | Error::Forbidden(_)
        )
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(ValidationErrors::Message(rejection.body_text()))
    }
}

/// Convert custom Error to HTTP response
///
/// Every variant is rendered inside the failure envelope:
/// `{"success": false, "error": ..., "code": ...}`. Store internals are
/// replaced by a generic message.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Error::Validation(errors) => {
                match errors {
                    ValidationErrors::Message(message) => {
                        serde_json::json!({
                            "success": false,
                            "error": message,
                            "code": "VALIDATION_ERROR"
                        })
                    }
                    ValidationErrors::Single { field, message } => {
                        serde_json::json!({
                            "success": false,
                            "error": "Validation failed",
                            "code": "VALIDATION_ERROR",
                            "fields": {
                                field: message
                            }
                        })
                    }
                    ValidationErrors::Multiple { fields } => {
                        serde_json::json!({
                            "success": false,
                            "error": "Validation failed",
                            "code": "VALIDATION_ERROR",
                            "fields": fields
                        })
                    }
                }
            }
            Error::NotFound(msg) => {
                serde_json::json!({
                    "success": false,
                    "error": msg,
                    "code": "NOT_FOUND"
                })
            }
            Error::Forbidden(msg) => {
                serde_json::json!({
                    "success": false,
                    "error": msg,
                    "code": "FORBIDDEN"
                })
            }
            Error::Unavailable(msg) => {
                serde_json::json!({
                    "success": false,
                    "error": msg,
                    "code": "SERVICE_UNAVAILABLE"
                })
            }
            Error::Mongo(_) | Error::Encode(_) | Error::Decode(_) => {
                serde_json::json!({
                    "success": false,
                    "error": "Database error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Internal(_) => {
                serde_json::json!({
                    "success": false,
                    "error": "Internal server error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Config(_) => {
                serde_json::json!({
                    "success": false,
                    "error": "Configuration error",
                    "code": "CONFIG_ERROR"
                })
            }
        };

        let mut response = (status, Json(body)).into_response();
        if status.is_server_error() {
            response
                .extensions_mut()
                .insert(ErrorDetail(self.to_string()));
        }
        response
    }
}
