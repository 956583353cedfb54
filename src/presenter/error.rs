//! Presenter error definitions.

use axum::http::StatusCode;
use thiserror::Error;

use crate::templating::TemplateError;

/// Errors that can abort a dispatch.
#[derive(Debug, Error)]
pub enum PresenterError {
    /// The request cannot be served; carries the HTTP status to answer with.
    #[error("{message}")]
    BadRequest { message: String, code: StatusCode },

    /// A required service is not registered in the container.
    #[error("Service not found: {0}")]
    MissingService(&'static str),

    /// The callback asked for an argument it never declared.
    #[error("Undeclared argument: {0}")]
    UndeclaredArgument(String),

    /// A bound argument could not be decoded into the requested type.
    #[error("Argument ${name} could not be decoded: {source}")]
    Argument {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Template construction or rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Error raised by application code inside the callback.
    #[error("Callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PresenterError {
    /// Bad request answered with 400.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::bad_request_with(message, StatusCode::BAD_REQUEST)
    }

    /// Bad request answered with the given status code.
    pub fn bad_request_with(message: impl Into<String>, code: StatusCode) -> Self {
        Self::BadRequest {
            message: message.into(),
            code,
        }
    }

    /// Wrap an application error raised inside a callback.
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Callback(err.into())
    }

    /// HTTP status this error should be answered with.
    pub fn code(&self) -> StatusCode {
        match self {
            Self::BadRequest { code, .. } => *code,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true for client errors raised by the dispatcher or `error()`.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }
}

/// Result type for presenter operations.
pub type PresenterResult<T> = Result<T, PresenterError>;
