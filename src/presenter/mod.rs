//! Micro presenter subsystem.
//!
//! # Data Flow
//! ```text
//! AppRequest
//!     → micro.rs (canonical URL check: GET/HEAD, non-AJAX → 301 if URL differs)
//!     → callback.rs (extract `callback` parameter, else 400)
//!     → args.rs (resolve services by type, bind values by name)
//!     → invoke callback
//!     → result.rs (CallbackResult)
//!     → micro.rs (normalize: template → TextResponse, response → pass through)
//!     → PresenterResponse
//! ```
//!
//! # Design Decisions
//! - Callbacks declare their parameters statically instead of being reflected on
//! - Results are a tagged union instead of being inspected at runtime
//! - Exactly one response per request, or an error

pub mod args;
pub mod callback;
pub mod error;
pub mod micro;
pub mod result;

pub use args::{combine_args, Args, BoundArg};
pub use callback::{Callback, ParamKind, ParamSpec, ValueType};
pub use error::{PresenterError, PresenterResult};
pub use micro::MicroPresenter;
pub use result::CallbackResult;
