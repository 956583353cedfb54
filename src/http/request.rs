//! HTTP request accessor.
//!
//! # Responsibilities
//! - Expose the absolute request URL and AJAX flag to presenters
//! - Derive base URL, base path and the router's reference URL from the script path
//! - Compare URLs the way canonical redirects need
//!
//! # Design Decisions
//! - Built once per request from axum request parts, then shared via Arc
//! - Query parameter order is irrelevant for equality; `%2F` and `%25` stay significant

use std::collections::BTreeMap;

use axum::http::{header, request::Parts, Method};
use url::Url;

use crate::config::PresenterConfig;
use crate::presenter::{PresenterError, PresenterResult};

/// Value of the AJAX header sent by browsers' XHR wrappers.
const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// The HTTP request a presenter is serving.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    script_path: String,
    ajax: bool,
}

impl HttpRequest {
    /// Create a non-AJAX GET request for `url` served by a script at `/`.
    pub fn new(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            script_path: "/".to_string(),
            ajax: false,
        }
    }

    pub fn with_script_path(mut self, script_path: impl Into<String>) -> Self {
        self.script_path = script_path.into();
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_ajax(mut self, ajax: bool) -> Self {
        self.ajax = ajax;
        self
    }

    /// Build from axum request parts.
    ///
    /// The host comes from the `Host` header, falling back to the URI authority.
    /// A URL that cannot be assembled from the client's input is a bad request.
    pub fn from_parts(parts: &Parts, config: &PresenterConfig) -> PresenterResult<Self> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost");
        let scheme = parts.uri.scheme_str().unwrap_or("http");
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let url = Url::parse(&format!("{scheme}://{host}{path_and_query}"))
            .map_err(|e| PresenterError::bad_request(format!("Invalid request URL: {e}.")))?;
        let ajax = parts
            .headers
            .get(config.ajax_header.as_str())
            .and_then(|h| h.to_str().ok())
            == Some(AJAX_HEADER_VALUE);

        Ok(Self {
            method: parts.method.clone(),
            url,
            script_path: config.script_path.clone(),
            ajax,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_ajax(&self) -> bool {
        self.ajax
    }

    pub fn script_path(&self) -> &str {
        &self.script_path
    }

    /// Script path up to and including its last `/`.
    pub fn base_path(&self) -> &str {
        match self.script_path.rfind('/') {
            Some(idx) => &self.script_path[..=idx],
            None => "/",
        }
    }

    /// Scheme, authority and base path.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.host_url(), self.base_path())
    }

    /// Scheme and authority, e.g. `https://example.com:8443`.
    pub fn host_url(&self) -> String {
        let mut out = format!("{}://{}", self.url.scheme(), self.url.host_str().unwrap_or(""));
        if let Some(port) = self.url.port() {
            out.push_str(&format!(":{port}"));
        }
        out
    }

    /// The current URL with its path replaced by the script path.
    pub fn reference_url(&self) -> Url {
        let mut url = self.url.clone();
        url.set_path(&self.script_path);
        url
    }
}

/// Equality of two URLs as seen by the canonical-URL check.
pub fn urls_equal(a: &Url, b: &Url) -> bool {
    let is_http = matches!(a.scheme(), "http" | "https");

    a.scheme() == b.scheme()
        && a.host_str().map(str::to_ascii_lowercase) == b.host_str().map(str::to_ascii_lowercase)
        && a.port_or_known_default() == b.port_or_known_default()
        && (is_http || (a.username() == b.username() && a.password() == b.password()))
        && unescape_path(a.path()) == unescape_path(b.path())
        && sorted_query(a) == sorted_query(b)
        && a.fragment() == b.fragment()
}

fn sorted_query(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Percent-decode `path`, leaving `%2F` and `%25` encoded.
fn unescape_path(path: &str) -> Vec<u8> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            match decoded {
                Some(b) if b != b'/' && b != b'%' => {
                    out.push(b);
                    i += 3;
                    continue;
                }
                Some(_) => {
                    out.push(b'%');
                    out.extend(bytes[i + 1..i + 3].iter().map(u8::to_ascii_uppercase));
                    i += 3;
                    continue;
                }
                None => {}
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}
