use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Object not found: {message}")]
    NotFound { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Missing argument: {message}")]
    NullArgument { message: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Input,
    State,
    Service,
    Configuration,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Lookup => "lookup",
            ErrorCategory::Input => "input",
            ErrorCategory::State => "state",
            ErrorCategory::Service => "service",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ServiceError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn null_argument(message: impl Into<String>) -> Self {
        ServiceError::NullArgument {
            message: message.into(),
        }
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        ServiceError::IllegalState {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::NotFound { .. } => ErrorCategory::Lookup,
            ServiceError::InvalidArgument { .. }
            | ServiceError::NullArgument { .. }
            | ServiceError::SerializationError(_) => ErrorCategory::Input,
            ServiceError::IllegalState { .. } => ErrorCategory::State,
            ServiceError::OperationFailed { .. } => ErrorCategory::Service,
            ServiceError::ConfigError { .. } => ErrorCategory::Configuration,
            ServiceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InvalidArgument { .. }
            | ServiceError::NullArgument { .. }
            | ServiceError::SerializationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::IllegalState { .. } => StatusCode::CONFLICT,
            ServiceError::OperationFailed { .. }
            | ServiceError::ConfigError { .. }
            | ServiceError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.category();

        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", category.as_str(), self);
        } else {
            tracing::warn!("Request rejected ({}): {}", category.as_str(), self);
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "category": category.as_str(),
        });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
