//! Argument binding.
//!
//! # Responsibilities
//! - Resolve service parameters from the DI container
//! - Match value parameters to request parameters by name
//! - Coerce request values to the declared scalar types
//!
//! # Design Decisions
//! - Absent values fall back to default, then null, then `[]` for arrays
//! - Anything else missing or mistyped is a bad request (400)
//! - Unresolved optional services bind to `None` rather than failing
//! - `null` request values count as absent

use std::any::Any;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use super::callback::{Callback, ParamKind, ValueType};
use super::error::{PresenterError, PresenterResult};
use super::micro::MicroPresenter;
use crate::application::{ParamValue, Params};
use crate::di::{ServiceResolver, SharedService};

/// A single bound argument.
#[derive(Clone)]
pub enum BoundArg {
    Value(Value),
    Service(Option<SharedService>),
}

impl std::fmt::Debug for BoundArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundArg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            BoundArg::Service(s) => f.debug_tuple("Service").field(&s.is_some()).finish(),
        }
    }
}

/// Arguments handed to a callback, in declaration order.
pub struct Args<'a> {
    presenter: &'a MicroPresenter,
    bound: Vec<(String, BoundArg)>,
}

impl<'a> Args<'a> {
    pub(crate) fn new(presenter: &'a MicroPresenter, bound: Vec<(String, BoundArg)>) -> Self {
        Self { presenter, bound }
    }

    /// The dispatching presenter.
    pub fn presenter(&self) -> &'a MicroPresenter {
        self.presenter
    }

    /// Decode the value argument `name` into `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> PresenterResult<T> {
        match self.find(name)? {
            BoundArg::Value(value) => {
                serde_json::from_value(value.clone()).map_err(|source| PresenterError::Argument {
                    name: name.to_string(),
                    source,
                })
            }
            BoundArg::Service(_) => Err(PresenterError::UndeclaredArgument(name.to_string())),
        }
    }

    /// Raw JSON value of argument `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.bound.iter().find_map(|(n, arg)| match arg {
            BoundArg::Value(v) if n == name => Some(v),
            _ => None,
        })
    }

    /// Service argument `name`, if it was resolved.
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        match self.find(name).ok()? {
            BoundArg::Service(Some(service)) => service.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Positional view of the bound arguments.
    pub fn positional(&self) -> impl Iterator<Item = &BoundArg> {
        self.bound.iter().map(|(_, arg)| arg)
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    fn find(&self, name: &str) -> PresenterResult<&BoundArg> {
        self.bound
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, arg)| arg)
            .ok_or_else(|| PresenterError::UndeclaredArgument(name.to_string()))
    }
}

/// Bind `callback`'s declared parameters against `params` and `resolver`.
pub fn combine_args(
    callback: &Callback,
    params: &Params,
    resolver: Option<&dyn ServiceResolver>,
) -> PresenterResult<Vec<(String, BoundArg)>> {
    let mut bound = Vec::with_capacity(callback.params().len());

    for spec in callback.params() {
        let arg = match &spec.kind {
            ParamKind::Service {
                type_id,
                type_name,
                required,
            } => {
                let service = resolver.and_then(|r| r.resolve(*type_id));
                if service.is_none() {
                    if *required {
                        return Err(PresenterError::MissingService(*type_name));
                    }
                    tracing::warn!(
                        callback = callback.name(),
                        param = %spec.name,
                        service = type_name,
                        "Service parameter left unresolved"
                    );
                }
                BoundArg::Service(service)
            }
            ParamKind::Value {
                ty,
                default,
                nullable,
            } => {
                let given = match params.get(&spec.name) {
                    Some(ParamValue::Value(Value::Null)) | None => None,
                    Some(ParamValue::Value(v)) => Some(v),
                    Some(ParamValue::Callback(_)) => {
                        return Err(type_mismatch(callback, &spec.name, *ty, "callback"));
                    }
                };

                match given {
                    Some(value) => match coerce(*ty, value) {
                        Some(v) => BoundArg::Value(v),
                        None => {
                            return Err(type_mismatch(
                                callback,
                                &spec.name,
                                *ty,
                                json_type_name(value),
                            ))
                        }
                    },
                    None => {
                        if let Some(default) = default {
                            BoundArg::Value(default.clone())
                        } else if *nullable {
                            BoundArg::Value(Value::Null)
                        } else if *ty == ValueType::Array {
                            BoundArg::Value(Value::Array(Vec::new()))
                        } else {
                            return Err(PresenterError::bad_request(format!(
                                "Missing parameter ${} required by {}.",
                                spec.name,
                                callback.name()
                            )));
                        }
                    }
                }
            }
        };
        bound.push((spec.name.clone(), arg));
    }

    tracing::debug!(callback = callback.name(), count = bound.len(), "Arguments bound");
    Ok(bound)
}

fn type_mismatch(callback: &Callback, name: &str, ty: ValueType, given: &str) -> PresenterError {
    PresenterError::bad_request(format!(
        "Argument ${} passed to {} must be {}, {} given.",
        name,
        callback.name(),
        ty,
        given
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "array",
    }
}

/// String form a scalar round-trips through; `false` is spelled `"0"`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Convert `value` to `ty`, refusing lossy conversions.
pub(crate) fn coerce(ty: ValueType, value: &Value) -> Option<Value> {
    match ty {
        ValueType::Mixed => Some(value.clone()),
        ValueType::Array => match value {
            Value::Array(_) | Value::Object(_) => Some(value.clone()),
            _ => None,
        },
        ValueType::String => scalar_text(value).map(Value::String),
        ValueType::Int => {
            let text = scalar_text(value)?;
            let n: i64 = text.parse().ok()?;
            (n.to_string() == text).then(|| Value::from(n))
        }
        ValueType::Float => {
            let text = scalar_text(value)?;
            let n: f64 = text.parse().ok()?;
            let number = Number::from_f64(n)?;
            (n.to_string() == text || number.to_string() == text).then_some(Value::Number(number))
        }
        ValueType::Bool => match scalar_text(value)?.as_str() {
            "1" => Some(Value::Bool(true)),
            "0" => Some(Value::Bool(false)),
            _ => None,
        },
    }
}
