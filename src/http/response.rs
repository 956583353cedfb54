//! Presenter responses.
//!
//! # Responsibilities
//! - Represent the three response shapes a presenter produces
//! - Convert them into axum responses at send time
//! - Map presenter errors to HTTP status codes
//!
//! # Design Decisions
//! - Templates render lazily, when the response is sent
//! - Render failures become a logged 500, never a panic
//! - Redirect targets are not validated at construction

use std::fmt;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::presenter::PresenterError;
use crate::templating::{Template, TemplateError};

/// Redirect to a URL with a 3xx status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    url: String,
    code: StatusCode,
}

impl RedirectResponse {
    pub fn new(url: impl Into<String>, code: StatusCode) -> Self {
        Self {
            url: url.into(),
            code,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.url) {
            Ok(location) => {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = self.code;
                response.headers_mut().insert(header::LOCATION, location);
                response
            }
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Redirect target is not a valid header value");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Body of a text response.
#[derive(Debug, Clone)]
pub enum TextBody {
    Plain(String),
    Template(Template),
}

/// Text sent with `200 OK`, either verbatim or rendered from a template.
#[derive(Debug, Clone)]
pub struct TextResponse {
    body: TextBody,
}

impl TextResponse {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            body: TextBody::Plain(text.into()),
        }
    }

    pub fn template(template: Template) -> Self {
        Self {
            body: TextBody::Template(template),
        }
    }

    pub fn body(&self) -> &TextBody {
        &self.body
    }

    /// The wrapped template, if this is a template response.
    pub fn as_template(&self) -> Option<&Template> {
        match &self.body {
            TextBody::Template(template) => Some(template),
            TextBody::Plain(_) => None,
        }
    }

    /// Produce the final text.
    pub fn render(&self) -> Result<String, TemplateError> {
        match &self.body {
            TextBody::Plain(text) => Ok(text.clone()),
            TextBody::Template(template) => template.render(),
        }
    }
}

impl IntoResponse for TextResponse {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(text) => (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                text,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Template rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Everything a micro presenter can answer with.
pub enum PresenterResponse {
    Redirect(RedirectResponse),
    Text(TextResponse),
    /// Application-built response passed through unchanged.
    Custom(Response),
}

impl PresenterResponse {
    pub fn as_redirect(&self) -> Option<&RedirectResponse> {
        match self {
            PresenterResponse::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextResponse> {
        match self {
            PresenterResponse::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_custom(self) -> Option<Response> {
        match self {
            PresenterResponse::Custom(response) => Some(response),
            _ => None,
        }
    }
}

impl From<RedirectResponse> for PresenterResponse {
    fn from(redirect: RedirectResponse) -> Self {
        PresenterResponse::Redirect(redirect)
    }
}

impl From<TextResponse> for PresenterResponse {
    fn from(text: TextResponse) -> Self {
        PresenterResponse::Text(text)
    }
}

impl fmt::Debug for PresenterResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenterResponse::Redirect(r) => f.debug_tuple("Redirect").field(r).finish(),
            PresenterResponse::Text(t) => f.debug_tuple("Text").field(t).finish(),
            PresenterResponse::Custom(r) => f.debug_tuple("Custom").field(&r.status()).finish(),
        }
    }
}

impl IntoResponse for PresenterResponse {
    fn into_response(self) -> Response {
        match self {
            PresenterResponse::Redirect(redirect) => redirect.into_response(),
            PresenterResponse::Text(text) => text.into_response(),
            PresenterResponse::Custom(response) => response,
        }
    }
}

impl IntoResponse for PresenterError {
    fn into_response(self) -> Response {
        match &self {
            PresenterError::BadRequest { message, code } => (*code, message.clone()).into_response(),
            other => {
                tracing::error!(error = %other, "Dispatch failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
