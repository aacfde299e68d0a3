use std::{
    any::{Any, TypeId},
    fmt::Debug,
    sync::Arc,
};

/// All errors must be Send + Sync so they can be shared through [crate::ContainerError]
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything stored in the container may be shared across threads once the container is,
/// so anything storable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// A type erased value held by or resolved from the container
#[derive(Clone)]
pub struct Value {
    info: TypeInfo,
    value: Arc<dyn Any + Send + Sync + 'static>,
}
impl Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Value").field(&self.info.type_name).finish()
    }
}

impl Value {
    pub fn new<T: Injectable>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without another allocation
    pub fn from_arc<T: Injectable>(value: Arc<T>) -> Self {
        Value {
            info: TypeInfo::of::<T>(),
            value,
        }
    }

    pub fn type_info(&self) -> TypeInfo {
        self.info
    }

    /// Returns the held value, or the name of the actually held type
    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.value.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.info.type_name),
        }
    }

    /// Whether both values point to the same allocation
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}
