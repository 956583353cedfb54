//! Dependency injection subsystem.
//!
//! # Data Flow
//! ```text
//! Application bootstrap
//!     → Container::add_service (one instance per type)
//!     → shared as Arc<dyn ServiceResolver>
//!
//! Per request:
//!     callback declares typed parameters
//!     → ServiceResolver::resolve(TypeId)
//!     → bound as Some(instance) or None
//! ```

pub mod container;

pub use container::{Container, ServiceResolver, SharedService};
