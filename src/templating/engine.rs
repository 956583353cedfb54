//! Template engine capability.
//!
//! # Responsibilities
//! - Describe where template source comes from (file or in-memory string)
//! - Define the engine and engine-factory interfaces the presenter renders through
//!
//! # Design Decisions
//! - The template language itself lives outside this crate
//! - The loader is picked by the source variant, not configured on the engine

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while loading or rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Neither a file nor an inline source was set.
    #[error("Template source is not set")]
    MissingSource,

    /// No engine was attached to the template.
    #[error("Template engine is not set")]
    MissingEngine,

    /// The template file could not be read.
    #[error("Unable to load template {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Engine-specific rendering failure.
    #[error("Render error: {0}")]
    Render(String),
}

/// Where the template text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Read from disk (file loader).
    File(PathBuf),
    /// Given verbatim (string loader).
    Inline(String),
}

impl TemplateSource {
    /// Load the template text.
    pub fn load(&self) -> Result<Cow<'_, str>, TemplateError> {
        match self {
            TemplateSource::File(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| TemplateError::Load {
                    path: path.clone(),
                    source,
                }),
            TemplateSource::Inline(text) => Ok(Cow::Borrowed(text)),
        }
    }

    /// File path, if this source uses the file loader.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TemplateSource::File(path) => Some(path),
            TemplateSource::Inline(_) => None,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, TemplateSource::Inline(_))
    }
}

/// A template engine capable of turning a source and parameters into text.
pub trait TemplateEngine: Send + Sync {
    fn render(
        &self,
        source: &TemplateSource,
        params: &Map<String, Value>,
    ) -> Result<String, TemplateError>;
}

/// Creates a fresh engine per template.
pub trait TemplateEngineFactory: Send + Sync {
    fn create(&self) -> Arc<dyn TemplateEngine>;
}

impl<F> TemplateEngineFactory for F
where
    F: Fn() -> Arc<dyn TemplateEngine> + Send + Sync,
{
    fn create(&self) -> Arc<dyn TemplateEngine> {
        self()
    }
}

/// The form in which an engine factory is registered in the container.
pub type SharedEngineFactory = Arc<dyn TemplateEngineFactory>;
