//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     HttpRequest
//!     → Router::match_request
//!     → AppRequest or no match (404)
//!
//! Canonical check (GET/HEAD, non-AJAX):
//!     AppRequest + reference URL
//!     → Router::construct_url
//!     → compared with the actual URL; differs → 301
//! ```

pub mod router;

pub use router::Router;
