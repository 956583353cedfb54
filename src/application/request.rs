//! Application-level request.
//!
//! # Responsibilities
//! - Carry the presenter name, HTTP method and routed parameters
//! - Hold the `callback` parameter a micro presenter dispatches to
//!
//! # Design Decisions
//! - Produced by the router, read-only to the presenter
//! - Parameters are JSON values except callbacks, which cannot be serialized

use std::collections::BTreeMap;

use axum::http::Method;
use serde_json::{Map, Value};

use crate::presenter::Callback;

/// Parameter key holding the callback.
pub const CALLBACK_KEY: &str = "callback";

/// A routed request parameter.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Value(Value),
    Callback(Callback),
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Value(value)
    }
}

impl From<Callback> for ParamValue {
    fn from(callback: Callback) -> Self {
        ParamValue::Callback(callback)
    }
}

/// Routed parameters, keyed by name.
pub type Params = BTreeMap<String, ParamValue>;

/// A request as seen by a presenter.
#[derive(Debug, Clone)]
pub struct AppRequest {
    presenter_name: String,
    method: Method,
    params: Params,
}

impl AppRequest {
    pub fn new(presenter_name: impl Into<String>, method: Method) -> Self {
        Self {
            presenter_name: presenter_name.into(),
            method,
            params: Params::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set the callback parameter.
    pub fn with_callback(self, callback: Callback) -> Self {
        self.with_param(CALLBACK_KEY, callback)
    }

    pub fn presenter_name(&self) -> &str {
        &self.presenter_name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn is_method(&self, method: &Method) -> bool {
        self.method == *method
    }

    pub fn parameters(&self) -> &Params {
        &self.params
    }

    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(name.into(), value.into());
    }

    /// The callback parameter, if present and invocable.
    pub fn callback(&self) -> Option<&Callback> {
        match self.params.get(CALLBACK_KEY)? {
            ParamValue::Callback(callback) => Some(callback),
            ParamValue::Value(_) => None,
        }
    }

    /// All non-callback parameters as a JSON object.
    pub fn value_parameters(&self) -> Map<String, Value> {
        self.params
            .iter()
            .filter_map(|(name, param)| match param {
                ParamValue::Value(value) => Some((name.clone(), value.clone())),
                ParamValue::Callback(_) => None,
            })
            .collect()
    }
}
