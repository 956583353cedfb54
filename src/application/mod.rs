//! Application request model.
//!
//! # Data Flow
//! ```text
//! HttpRequest
//!     → Router::match_request
//!     → AppRequest (presenter name, method, params incl. callback)
//!     → MicroPresenter::run
//! ```

pub mod request;

pub use request::{AppRequest, ParamValue, Params, CALLBACK_KEY};
