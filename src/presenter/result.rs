//! Values a callback may return.

use std::fmt;
use std::path::PathBuf;

use axum::response::Response;
use serde_json::{Map, Value};

use crate::http::RedirectResponse;
use crate::templating::Template;

/// What a callback produced; normalized into a `PresenterResponse` by the presenter.
pub enum CallbackResult {
    /// Template source text rendered with no extra parameters.
    TemplatePath(String),
    /// Template file rendered with extra parameters.
    TemplateFile(PathBuf, Map<String, Value>),
    /// In-memory template source rendered with extra parameters.
    TemplateInline(String, Map<String, Value>),
    /// A template the callback built itself.
    Template(Template),
    /// Plain text sent verbatim.
    Raw(String),
    /// Redirect passed through unchanged.
    Redirect(RedirectResponse),
    /// Any other response passed through unchanged.
    Response(Response),
}

impl CallbackResult {
    /// Template source text with no extra parameters; uses the string loader.
    pub fn path(source: impl Into<String>) -> Self {
        Self::TemplatePath(source.into())
    }

    /// Template file with parameters; `params` must be a JSON object or null.
    pub fn file(path: impl Into<PathBuf>, params: Value) -> Self {
        Self::TemplateFile(path.into(), into_map(params))
    }

    /// Inline template source with parameters; `params` must be a JSON object or null.
    pub fn inline(source: impl Into<String>, params: Value) -> Self {
        Self::TemplateInline(source.into(), into_map(params))
    }
}

/// Non-object values carry no named parameters and are dropped.
fn into_map(params: Value) -> Map<String, Value> {
    match params {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl From<Template> for CallbackResult {
    fn from(template: Template) -> Self {
        Self::Template(template)
    }
}

impl From<RedirectResponse> for CallbackResult {
    fn from(redirect: RedirectResponse) -> Self {
        Self::Redirect(redirect)
    }
}

impl From<Response> for CallbackResult {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl fmt::Debug for CallbackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplatePath(source) => f.debug_tuple("TemplatePath").field(source).finish(),
            Self::TemplateFile(path, params) => {
                f.debug_tuple("TemplateFile").field(path).field(params).finish()
            }
            Self::TemplateInline(source, params) => {
                f.debug_tuple("TemplateInline").field(source).field(params).finish()
            }
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Raw(text) => f.debug_tuple("Raw").field(text).finish(),
            Self::Redirect(redirect) => f.debug_tuple("Redirect").field(redirect).finish(),
            Self::Response(response) => f
                .debug_tuple("Response")
                .field(&response.status())
                .finish(),
        }
    }
}
