//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PresenterConfig (validated, immutable)
//!     → shared via Arc with the HTTP adapter and each presenter
//! ```
//!
//! # Design Decisions
//! - Every field has a default; an empty file is a valid config
//! - serde rejects malformed values, validation.rs rejects unusable ones

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, PresenterConfig};
pub use validation::ValidationError;
