use std::{any::type_name, fmt::Debug, sync::Arc};

use crate::{
    container::Container,
    decorate,
    errors::ContainerError,
    types::{Injectable, TypeInfo, Value},
};

type DynFactory = dyn Fn(&Container) -> Result<Value, ContainerError> + Send + Sync;
type DynDecorator = dyn Fn(Value, &Container) -> Result<Value, ContainerError> + Send + Sync;

/// A service definition: computes a value on demand, given the container
///
/// Clones share the same closure, so a shared definition and its clones
/// share a single cached instance.
#[derive(Clone)]
pub struct Definition {
    factory: Arc<DynFactory>,
    shared: bool,
}
impl Debug for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Definition")
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

impl Definition {
    /// Creates a definition from a typed factory
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Self::from_fn(move |container| factory(container).map(Value::new))
    }

    /// Creates a definition from an untyped factory
    pub fn from_fn<F>(factory: F) -> Self
    where
        F: Fn(&Container) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        Definition {
            factory: Arc::new(factory),
            shared: false,
        }
    }

    /// A definition always resolving to the same value
    pub(crate) fn constant(value: Value) -> Self {
        Self::from_fn(move |_| Ok(value.clone()))
    }

    pub(crate) fn into_shared(self) -> Self {
        Definition {
            shared: true,
            ..self
        }
    }

    /// Invokes the definition
    pub fn call(&self, container: &Container) -> Result<Value, ContainerError> {
        (self.factory)(container)
    }

    /// Invokes the definition and downcasts the result
    pub fn call_as<T: Injectable>(&self, container: &Container) -> Result<Arc<T>, ContainerError> {
        self.call(container)?
            .downcast()
            .map_err(|actual_type| ContainerError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })
    }

    /// Whether results are cached for the lifetime of this definition
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Whether both definitions are the same closure
    pub fn ptr_eq(&self, other: &Definition) -> bool {
        Arc::ptr_eq(&self.factory, &other.factory)
    }
}

/// Decorates the resolved value of an existing definition, see [Container::extend]
#[derive(Clone)]
pub struct Decorator(Arc<DynDecorator>);
impl Debug for Decorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Decorator")
    }
}

impl Decorator {
    /// Creates a decorator from a typed closure
    ///
    /// Fails with [ContainerError::DowncastFailed] at resolution if the decorated value is not a `T`
    pub fn new<T, U, F>(decorator: F) -> Self
    where
        T: Injectable,
        U: Injectable,
        F: Fn(Arc<T>, &Container) -> Result<U, ContainerError> + Send + Sync + 'static,
    {
        Self::from_fn(move |value, container| {
            let original = value
                .downcast::<T>()
                .map_err(|actual_type| ContainerError::DowncastFailed {
                    required_type: type_name::<T>(),
                    actual_type,
                })?;

            decorator(original, container).map(Value::new)
        })
    }

    /// Creates a decorator from an untyped closure
    pub fn from_fn<F>(decorator: F) -> Self
    where
        F: Fn(Value, &Container) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        Decorator(Arc::new(decorator))
    }

    pub fn call(&self, value: Value, container: &Container) -> Result<Value, ContainerError> {
        (self.0)(value, container)
    }
}

/// An item stored in the container
#[derive(Clone, Debug)]
pub enum Entry {
    /// Literal value, returned as is
    Parameter(Value),
    /// Invoked with the container on every resolution
    Service(Definition),
    /// Resolves to the definition itself, which is never invoked by the container
    Protected(Definition),
}

impl Entry {
    pub fn parameter<T: Injectable>(value: T) -> Self {
        Entry::Parameter(Value::new(value))
    }

    pub fn service<T, F>(factory: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Entry::Service(Definition::new(factory))
    }

    /// A service computed once and cached for the lifetime of the entry
    pub fn shared<T, F>(factory: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Entry::Service(decorate::share(Definition::new(factory)))
    }

    /// A callable stored as a value
    pub fn protected<T, F>(callable: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Entry::Protected(Definition::new(callable))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Entry::Service(_))
    }

    /// Services and protected callables are callable, parameters never are
    pub fn is_callable(&self) -> bool {
        !matches!(self, Entry::Parameter(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Parameter(_) => "parameter",
            Entry::Service(definition) if definition.is_shared() => "shared service",
            Entry::Service(_) => "service",
            Entry::Protected(_) => "protected",
        }
    }

    /// Type of the value held by a parameter, or of the definition for callables
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Entry::Parameter(value) => value.type_info(),
            Entry::Service(_) | Entry::Protected(_) => TypeInfo::of::<Definition>(),
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::Parameter(value)
    }
}

impl From<Definition> for Entry {
    fn from(definition: Definition) -> Self {
        Entry::Service(definition)
    }
}
