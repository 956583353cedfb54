//! Type-keyed service lookup.
//!
//! # Responsibilities
//! - Define the resolver capability the presenter consumes
//! - Provide a minimal registry implementing it
//!
//! # Design Decisions
//! - Lookup is nullable: an unknown type yields `None`, never an error
//! - Services are shared as `Arc`, one instance per type
//! - Registration happens before the container is shared; no interior mutability

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A shared, type-erased service instance.
pub type SharedService = Arc<dyn Any + Send + Sync>;

/// Capability to resolve a service instance by its type.
pub trait ServiceResolver: Send + Sync {
    /// Look up the instance registered for `type_id`.
    fn resolve(&self, type_id: TypeId) -> Option<SharedService>;
}

impl dyn ServiceResolver {
    /// Typed lookup on top of [`ServiceResolver::resolve`].
    pub fn get_by_type<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.resolve(TypeId::of::<T>())?.downcast::<T>().ok()
    }
}

/// Service registry keyed by concrete type.
#[derive(Default)]
pub struct Container {
    services: HashMap<TypeId, SharedService>,
    names: HashMap<TypeId, &'static str>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service`, replacing any previous instance of the same type.
    pub fn add_service<T: Any + Send + Sync>(&mut self, service: T) -> &mut Self {
        self.add_shared(Arc::new(service))
    }

    /// Register an already shared instance.
    pub fn add_shared<T: Any + Send + Sync>(&mut self, service: Arc<T>) -> &mut Self {
        let id = TypeId::of::<T>();
        self.services.insert(id, service);
        self.names.insert(id, type_name::<T>());
        self
    }

    /// Builder form of [`Container::add_service`].
    pub fn with_service<T: Any + Send + Sync>(mut self, service: T) -> Self {
        self.add_service(service);
        self
    }

    /// Typed lookup.
    pub fn get_by_type<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())?
            .clone()
            .downcast::<T>()
            .ok()
    }

    /// Returns true if an instance of `T` is registered.
    pub fn has<T: Any>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceResolver for Container {
    fn resolve(&self, type_id: TypeId) -> Option<SharedService> {
        self.services.get(&type_id).cloned()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names.values().collect();
        names.sort();
        f.debug_struct("Container").field("services", &names).finish()
    }
}
