//! Shared collaborators for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use micro_presenter::application::AppRequest;
use micro_presenter::templating::{TemplateError, TemplateSource};
use micro_presenter::{
    Callback, Container, HttpRequest, Router, ServiceResolver, SharedEngineFactory,
    TemplateEngine,
};
use serde_json::{Map, Value};
use url::Url;

/// Renders by replacing `{$name}` with the parameter's text.
///
/// File sources are not read from disk; they render as `file:<path>` followed
/// by the substituted parameters, which keeps assertions independent of the filesystem.
pub struct StubEngine;

impl TemplateEngine for StubEngine {
    fn render(
        &self,
        source: &TemplateSource,
        params: &Map<String, Value>,
    ) -> Result<String, TemplateError> {
        let mut text = match source {
            TemplateSource::File(path) => format!("file:{}", path.display()),
            TemplateSource::Inline(text) => text.clone(),
        };
        for (name, value) in params {
            let replacement = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            text = text.replace(&format!("{{${name}}}"), &replacement);
        }
        Ok(text)
    }
}

pub fn engine_factory() -> SharedEngineFactory {
    Arc::new(|| Arc::new(StubEngine) as Arc<dyn TemplateEngine>)
}

/// A container holding the stub engine factory.
pub fn container_with_engine() -> Container {
    let mut container = Container::new();
    container.add_service(engine_factory());
    container
}

pub fn context(container: Container) -> Option<Arc<dyn ServiceResolver>> {
    Some(Arc::new(container))
}

/// Routes exact paths to callbacks; the canonical form of a path is lowercase
/// without a trailing slash, query parameters are appended sorted.
#[derive(Default)]
pub struct StubRouter {
    routes: Vec<(String, Callback)>,
    canonical_override: Option<Url>,
}

impl StubRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, callback: Callback) -> Self {
        self.routes.push((path.to_string(), callback));
        self
    }

    /// Make `construct_url` return `url` for every request.
    pub fn canonical(mut self, url: &str) -> Self {
        self.canonical_override = Some(Url::parse(url).unwrap());
        self
    }

    fn normalize(path: &str) -> String {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_lowercase()
        }
    }
}

impl Router for StubRouter {
    fn match_request(&self, http_request: &HttpRequest) -> Option<AppRequest> {
        let path = Self::normalize(http_request.url().path());
        let (route, callback) = self.routes.iter().find(|(p, _)| *p == path)?;

        let mut request = AppRequest::new("Micro", http_request.method().clone())
            .with_callback(callback.clone())
            .with_param("route", Value::String(route.clone()));
        for (k, v) in http_request.url().query_pairs() {
            request.set_parameter(k.into_owned(), Value::String(v.into_owned()));
        }
        Some(request)
    }

    fn construct_url(&self, request: &AppRequest, ref_url: &Url) -> Option<Url> {
        if let Some(url) = &self.canonical_override {
            return Some(url.clone());
        }

        let mut params = request.value_parameters();
        let route = params.remove("route")?;
        let mut url = ref_url.clone();
        url.set_path(route.as_str()?);
        url.set_query(None);
        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (k, v) in &params {
                match v {
                    Value::String(s) => query.append_pair(k, s),
                    other => query.append_pair(k, &other.to_string()),
                };
            }
        }
        Some(url)
    }
}
