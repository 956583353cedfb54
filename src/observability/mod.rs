//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! presenter / http / config
//!     → tracing events (dispatch, bound arguments, redirects, failures)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
