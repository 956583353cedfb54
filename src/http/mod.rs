//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Axum request
//!     → server.rs (fallback handler, tracing layer)
//!     → request.rs (HttpRequest: absolute URL, AJAX flag, base path)
//!     → Router::match_request → MicroPresenter::run
//!     → response.rs (redirect / text / custom → Axum response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{urls_equal, HttpRequest};
pub use response::{PresenterResponse, RedirectResponse, TextBody, TextResponse};
pub use server::{dispatch, presenter_handler, AppState, HttpServer};
