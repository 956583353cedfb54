//! Router capability.
//!
//! # Responsibilities
//! - Map an HTTP request to an application request (callback included)
//! - Construct the canonical URL of an application request
//!
//! # Design Decisions
//! - `None` from `construct_url` means "no opinion": no canonical redirect
//! - Implementations are shared across requests and must be thread-safe

use url::Url;

use crate::application::AppRequest;
use crate::http::HttpRequest;

/// Two-way mapping between URLs and application requests.
pub trait Router: Send + Sync {
    /// Match `http_request`, or `None` when no route applies.
    fn match_request(&self, http_request: &HttpRequest) -> Option<AppRequest>;

    /// Build the canonical absolute URL for `request`, relative to `ref_url`.
    fn construct_url(&self, request: &AppRequest, ref_url: &Url) -> Option<Url>;
}
