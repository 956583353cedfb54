//! Micro presenter: dispatch a routed request to a callback.
//!
//! # Architecture Overview
//!
//! ```text
//!   HTTP request ──▶ http::server ──▶ Router::match_request ──▶ AppRequest
//!                                                                   │
//!                                                                   ▼
//!                       ┌──────────────────── MicroPresenter::run ─────────────────────┐
//!                       │  canonical URL check ─▶ callback ─▶ argument binding (DI)     │
//!                       │                                        │                     │
//!                       │                    invoke ◀────────────┘                     │
//!                       │                       │                                      │
//!                       │                       ▼                                      │
//!                       │  CallbackResult ─▶ template / text / redirect / passthrough  │
//!                       └──────────────────────────────────────────────────────────────┘
//!                                                                   │
//!   HTTP response ◀── PresenterResponse::into_response ◀────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let callback = Callback::new(|args| {
//!     let name: String = args.get("name")?;
//!     Ok(CallbackResult::inline("Hello {$name}!", json!({ "name": name })))
//! })
//! .param("name", ValueType::String);
//!
//! let request = AppRequest::new("Micro", Method::GET)
//!     .with_callback(callback)
//!     .with_param("name", json!("World"));
//!
//! let mut presenter = MicroPresenter::new(Some(container), None, None);
//! let response = presenter.run(request)?;
//! ```

pub mod application;
pub mod config;
pub mod di;
pub mod http;
pub mod observability;
pub mod presenter;
pub mod routing;
pub mod templating;

pub use application::{AppRequest, ParamValue};
pub use config::PresenterConfig;
pub use di::{Container, ServiceResolver};
pub use http::{HttpRequest, HttpServer, PresenterResponse, RedirectResponse, TextResponse};
pub use presenter::{
    Args, Callback, CallbackResult, MicroPresenter, PresenterError, PresenterResult, ValueType,
};
pub use routing::Router;
pub use templating::{SharedEngineFactory, Template, TemplateEngine, TemplateEngineFactory};
