//! Per-request template value object.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::engine::{TemplateEngine, TemplateError, TemplateSource};
use crate::di::ServiceResolver;

/// A template populated for a single request and discarded after rendering.
#[derive(Clone, Default)]
pub struct Template {
    engine: Option<Arc<dyn TemplateEngine>>,
    source: Option<TemplateSource>,
    params: Map<String, Value>,
    presenter: Option<String>,
    context: Option<Arc<dyn ServiceResolver>>,
}

impl Template {
    /// Create a template rendered by `engine`.
    pub fn new(engine: Arc<dyn TemplateEngine>) -> Self {
        Self {
            engine: Some(engine),
            ..Default::default()
        }
    }

    /// Create a template without an engine; one must be attached before rendering.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> Option<&Arc<dyn TemplateEngine>> {
        self.engine.as_ref()
    }

    pub fn set_engine(&mut self, engine: Arc<dyn TemplateEngine>) -> &mut Self {
        self.engine = Some(engine);
        self
    }

    /// Use the file loader with `path`.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.source = Some(TemplateSource::File(path.into()));
        self
    }

    /// Use the string loader with `source` as the template text.
    pub fn set_source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = Some(TemplateSource::Inline(source.into()));
        self
    }

    pub fn source(&self) -> Option<&TemplateSource> {
        self.source.as_ref()
    }

    /// Merge `params` into the template, overwriting existing keys.
    pub fn set_parameters(&mut self, params: Map<String, Value>) -> &mut Self {
        self.params.extend(params);
        self
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Name of the presenter that created this template.
    pub fn presenter(&self) -> Option<&str> {
        self.presenter.as_deref()
    }

    pub fn set_presenter(&mut self, name: impl Into<String>) -> &mut Self {
        self.presenter = Some(name.into());
        self
    }

    /// DI context of the presenter that created this template.
    pub fn context(&self) -> Option<&Arc<dyn ServiceResolver>> {
        self.context.as_ref()
    }

    pub fn set_context(&mut self, context: Option<Arc<dyn ServiceResolver>>) -> &mut Self {
        self.context = context;
        self
    }

    /// Render through the attached engine.
    pub fn render(&self) -> Result<String, TemplateError> {
        let engine = self.engine.as_ref().ok_or(TemplateError::MissingEngine)?;
        let source = self.source.as_ref().ok_or(TemplateError::MissingSource)?;
        engine.render(source, &self.params)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("params", &self.params)
            .field("presenter", &self.presenter)
            .field("has_engine", &self.engine.is_some())
            .field("has_context", &self.context.is_some())
            .finish()
    }
}
