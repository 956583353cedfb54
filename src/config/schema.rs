//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for micro presenters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Redirect GET/HEAD requests to the router's canonical URL.
    pub canonical_redirect: bool,

    /// Path of the front script; base path and reference URLs derive from it.
    pub script_path: String,

    /// Header whose value `XMLHttpRequest` marks an AJAX request.
    pub ajax_header: String,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            canonical_redirect: true,
            script_path: "/".to_string(),
            ajax_header: "X-Requested-With".to_string(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "micro_presenter=info".to_string(),
        }
    }
}
