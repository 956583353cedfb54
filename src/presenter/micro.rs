//! The micro presenter.
//!
//! # Responsibilities
//! - Redirect GET/HEAD requests to their canonical URL
//! - Extract and invoke the request's callback with bound arguments
//! - Normalize the callback's result into a response
//! - Create templates populated with request context
//!
//! # Design Decisions
//! - One instance serves one request at a time (`run` takes `&mut self`)
//! - Router and HTTP accessor are optional; canonicalization needs both
//! - Errors returned by the callback propagate untouched
//! - Only `TemplateFile` results read from disk; string results are template text

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::{Map, Value};

use super::args::{combine_args, Args};
use super::error::{PresenterError, PresenterResult};
use super::result::CallbackResult;
use crate::application::AppRequest;
use crate::config::PresenterConfig;
use crate::di::ServiceResolver;
use crate::http::{urls_equal, HttpRequest, PresenterResponse, RedirectResponse, TextResponse};
use crate::routing::Router;
use crate::templating::{SharedEngineFactory, Template, TemplateEngineFactory};

/// Dispatches an application request to its callback.
pub struct MicroPresenter {
    context: Option<Arc<dyn ServiceResolver>>,
    http_request: Option<Arc<HttpRequest>>,
    router: Option<Arc<dyn Router>>,
    canonical_redirect: bool,
    request: Option<AppRequest>,
}

impl MicroPresenter {
    /// Create a presenter with its optional collaborators.
    pub fn new(
        context: Option<Arc<dyn ServiceResolver>>,
        http_request: Option<Arc<HttpRequest>>,
        router: Option<Arc<dyn Router>>,
    ) -> Self {
        Self {
            context,
            http_request,
            router,
            canonical_redirect: true,
            request: None,
        }
    }

    /// Apply presenter settings from configuration.
    pub fn with_config(mut self, config: &PresenterConfig) -> Self {
        self.canonical_redirect = config.canonical_redirect;
        self
    }

    /// The DI container.
    pub fn context(&self) -> Option<&Arc<dyn ServiceResolver>> {
        self.context.as_ref()
    }

    /// The most recently dispatched request.
    pub fn request(&self) -> Option<&AppRequest> {
        self.request.as_ref()
    }

    pub fn http_request(&self) -> Option<&Arc<HttpRequest>> {
        self.http_request.as_ref()
    }

    /// Dispatch `request` and produce exactly one response.
    pub fn run(&mut self, request: AppRequest) -> PresenterResult<PresenterResponse> {
        let span = tracing::debug_span!(
            "micro_presenter",
            presenter = %request.presenter_name(),
            method = %request.method()
        );
        let _enter = span.enter();

        self.request = Some(request.clone());

        if let Some(redirect) = self.canonical_redirect(&request) {
            return Ok(PresenterResponse::Redirect(redirect));
        }

        let Some(callback) = request.callback() else {
            tracing::warn!("Request has no invocable callback");
            return Err(PresenterError::bad_request(
                "Parameter callback is not a valid closure.",
            ));
        };

        let bound = combine_args(callback, request.parameters(), self.context.as_deref())?;
        tracing::debug!(callback = callback.name(), "Invoking callback");
        let result = callback.invoke(Args::new(self, bound))?;

        self.normalize(result)
    }

    /// Create a template populated for the current request.
    pub fn create_template(&self) -> PresenterResult<Template> {
        self.create_template_with(None, None)
    }

    /// Create a template, optionally starting from `base` and using `engine_factory`.
    ///
    /// Without a factory the engine comes from the container's `SharedEngineFactory`.
    pub fn create_template_with(
        &self,
        base: Option<Template>,
        engine_factory: Option<&dyn TemplateEngineFactory>,
    ) -> PresenterResult<Template> {
        let engine = match engine_factory {
            Some(factory) => factory.create(),
            None => self
                .context
                .as_ref()
                .and_then(|c| c.get_by_type::<SharedEngineFactory>())
                .ok_or(PresenterError::MissingService("TemplateEngineFactory"))?
                .create(),
        };

        let mut template = match base {
            Some(mut template) => {
                if template.engine().is_none() {
                    template.set_engine(engine);
                }
                template
            }
            None => Template::new(engine),
        };

        if let Some(request) = &self.request {
            template
                .set_parameters(request.value_parameters())
                .set_presenter(request.presenter_name());
        }
        template.set_context(self.context.clone());

        if let Some(http) = &self.http_request {
            template
                .set_parameter("baseUrl", http.base_url().trim_end_matches('/'))
                .set_parameter("basePath", http.base_path().trim_end_matches('/'));
        }

        Ok(template)
    }

    /// Redirect with `302 Found`.
    pub fn redirect_url(&self, url: impl Into<String>) -> RedirectResponse {
        self.redirect_url_with(url, StatusCode::FOUND)
    }

    pub fn redirect_url_with(&self, url: impl Into<String>, code: StatusCode) -> RedirectResponse {
        RedirectResponse::new(url, code)
    }

    /// Bad request answered with `404 Not Found`; return it from the callback.
    pub fn error(&self, message: impl Into<String>) -> PresenterError {
        self.error_with(message, StatusCode::NOT_FOUND)
    }

    pub fn error_with(&self, message: impl Into<String>, code: StatusCode) -> PresenterError {
        PresenterError::bad_request_with(message, code)
    }

    fn canonical_redirect(&self, request: &AppRequest) -> Option<RedirectResponse> {
        if !self.canonical_redirect {
            return None;
        }
        let (http, router) = (self.http_request.as_ref()?, self.router.as_ref()?);
        if http.is_ajax() || !(request.is_method(&Method::GET) || request.is_method(&Method::HEAD)) {
            return None;
        }

        let url = router.construct_url(request, &http.reference_url())?;
        if urls_equal(http.url(), &url) {
            return None;
        }

        tracing::info!(from = %http.url(), to = %url, "Redirecting to canonical URL");
        Some(RedirectResponse::new(url.as_str(), StatusCode::MOVED_PERMANENTLY))
    }

    fn normalize(&self, result: CallbackResult) -> PresenterResult<PresenterResponse> {
        let response = match result {
            CallbackResult::TemplatePath(source) => self.inline_template(source, Map::new())?,
            CallbackResult::TemplateFile(path, params) => self.file_template(path, params)?,
            CallbackResult::TemplateInline(source, params) => self.inline_template(source, params)?,
            CallbackResult::Template(template) => TextResponse::template(template).into(),
            CallbackResult::Raw(text) => TextResponse::plain(text).into(),
            CallbackResult::Redirect(redirect) => redirect.into(),
            CallbackResult::Response(response) => PresenterResponse::Custom(response),
        };
        Ok(response)
    }

    fn inline_template(
        &self,
        source: String,
        params: Map<String, Value>,
    ) -> PresenterResult<PresenterResponse> {
        let mut template = self.create_template()?;
        template.set_parameters(params).set_source(source);
        Ok(TextResponse::template(template).into())
    }

    fn file_template(
        &self,
        path: PathBuf,
        params: Map<String, Value>,
    ) -> PresenterResult<PresenterResponse> {
        let mut template = self.create_template()?;
        template.set_parameters(params).set_file(path);
        Ok(TextResponse::template(template).into())
    }
}

impl std::fmt::Debug for MicroPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicroPresenter")
            .field("has_context", &self.context.is_some())
            .field("http_request", &self.http_request)
            .field("has_router", &self.router.is_some())
            .field("canonical_redirect", &self.canonical_redirect)
            .field("request", &self.request)
            .finish()
    }
}
