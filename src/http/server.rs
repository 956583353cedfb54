//! HTTP server wiring.
//!
//! # Responsibilities
//! - Create an Axum Router whose every request goes through a micro presenter
//! - Build the HTTP accessor and match the application request per request
//! - Wire up request tracing middleware
//! - Bind the server to a listener

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, Request, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::PresenterConfig;
use crate::di::ServiceResolver;
use crate::http::request::HttpRequest;
use crate::http::response::PresenterResponse;
use crate::presenter::{MicroPresenter, PresenterError, PresenterResult};
use crate::routing::Router;

/// Shared state injected into the presenter handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<dyn Router>,
    pub context: Option<Arc<dyn ServiceResolver>>,
    pub config: Arc<PresenterConfig>,
}

impl AppState {
    pub fn new(router: Arc<dyn Router>, config: PresenterConfig) -> Self {
        Self {
            router,
            context: None,
            config: Arc::new(config),
        }
    }

    pub fn with_context(mut self, context: Arc<dyn ServiceResolver>) -> Self {
        self.context = Some(context);
        self
    }
}

/// HTTP front for micro presenters.
pub struct HttpServer {
    router: axum::Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(presenter_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The underlying Axum router, e.g. to nest or test it.
    pub fn into_router(self) -> axum::Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router).await
    }
}

/// Serve one HTTP request through a fresh micro presenter.
pub async fn presenter_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    match dispatch(&state, &parts) {
        Ok(response) => response.into_response(),
        Err(err) => {
            if err.is_bad_request() {
                tracing::warn!(uri = %parts.uri, status = %err.code(), error = %err, "Bad request");
            }
            err.into_response()
        }
    }
}

/// Match the request and run it through a new presenter.
pub fn dispatch(state: &AppState, parts: &Parts) -> PresenterResult<PresenterResponse> {
    let http = Arc::new(HttpRequest::from_parts(parts, &state.config)?);

    let Some(request) = state.router.match_request(&http) else {
        return Err(PresenterError::bad_request_with(
            "No route for HTTP request.",
            StatusCode::NOT_FOUND,
        ));
    };

    let mut presenter = MicroPresenter::new(
        state.context.clone(),
        Some(http),
        Some(state.router.clone()),
    )
    .with_config(&state.config);

    presenter.run(request)
}
