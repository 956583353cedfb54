//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the script path, AJAX header name and log filter
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PresenterConfig → Result<(), Vec<ValidationError>>

use axum::http::HeaderName;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::PresenterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("script_path must start with '/': {0:?}")]
    ScriptPath(String),

    #[error("ajax_header is not a valid header name: {0:?}")]
    AjaxHeader(String),

    #[error("observability.log_level is not a valid filter: {0:?}")]
    LogLevel(String),
}

/// Validate `config`, collecting every error.
pub fn validate_config(config: &PresenterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.script_path.starts_with('/') {
        errors.push(ValidationError::ScriptPath(config.script_path.clone()));
    }

    if HeaderName::from_bytes(config.ajax_header.as_bytes()).is_err() {
        errors.push(ValidationError::AjaxHeader(config.ajax_header.clone()));
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
