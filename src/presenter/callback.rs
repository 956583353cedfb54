//! Callback declaration.
//!
//! # Responsibilities
//! - Hold the application closure a route dispatches to
//! - Declare the closure's parameters up front (name, type, default)
//!
//! # Design Decisions
//! - Parameters are declared statically; nothing is discovered at runtime
//! - Declaration order is the positional order arguments are bound in
//! - Cloning a callback is cheap (the closure is shared)

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::args::Args;
use super::error::PresenterResult;
use super::result::CallbackResult;

/// Scalar or compound type a value parameter is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Accept any value as given.
    Mixed,
    String,
    Int,
    Float,
    Bool,
    /// JSON array or object.
    Array,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Mixed => "mixed",
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// How a declared parameter gets its value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// Taken from the request parameters by name.
    Value {
        ty: ValueType,
        default: Option<Value>,
        nullable: bool,
    },
    /// Resolved from the DI container by type.
    Service {
        type_id: TypeId,
        type_name: &'static str,
        required: bool,
    },
}

/// A single declared callback parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub fn is_service(&self) -> bool {
        matches!(self.kind, ParamKind::Service { .. })
    }
}

type CallbackFn = dyn Fn(Args<'_>) -> PresenterResult<CallbackResult> + Send + Sync;

/// Application code a micro presenter dispatches to.
///
/// # Example
///
/// ```rust,ignore
/// let callback = Callback::new(|args| {
///     let name: String = args.get("name")?;
///     Ok(CallbackResult::inline("Hello {$name}", json!({ "name": name })))
/// })
/// .param("name", ValueType::String)
/// .service::<Database>("db");
/// ```
#[derive(Clone)]
pub struct Callback {
    name: String,
    params: Vec<ParamSpec>,
    func: Arc<CallbackFn>,
}

impl Callback {
    /// Wrap `func`; parameters are declared with the builder methods.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Args<'_>) -> PresenterResult<CallbackResult> + Send + Sync + 'static,
    {
        Self {
            name: "{closure}".to_string(),
            params: Vec::new(),
            func: Arc::new(func),
        }
    }

    /// Name used in error messages and logs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare a required value parameter.
    pub fn param(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.push_value(name, ty, None, false)
    }

    /// Declare a value parameter with a default.
    pub fn optional(self, name: impl Into<String>, ty: ValueType, default: impl Into<Value>) -> Self {
        self.push_value(name, ty, Some(default.into()), false)
    }

    /// Declare a value parameter that binds to `null` when absent.
    pub fn nullable(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.push_value(name, ty, None, true)
    }

    /// Declare a service parameter; binds to `None` when the container lacks `T`.
    pub fn service<T: Any + Send + Sync>(self, name: impl Into<String>) -> Self {
        self.push_service::<T>(name, false)
    }

    /// Declare a service parameter that fails the dispatch when `T` is unresolvable.
    pub fn required_service<T: Any + Send + Sync>(self, name: impl Into<String>) -> Self {
        self.push_service::<T>(name, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters in positional order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub(crate) fn invoke(&self, args: Args<'_>) -> PresenterResult<CallbackResult> {
        (self.func)(args)
    }

    fn push_value(
        mut self,
        name: impl Into<String>,
        ty: ValueType,
        default: Option<Value>,
        nullable: bool,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind: ParamKind::Value {
                ty,
                default,
                nullable,
            },
        });
        self
    }

    fn push_service<T: Any + Send + Sync>(mut self, name: impl Into<String>, required: bool) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind: ParamKind::Service {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                required,
            },
        });
        self
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
