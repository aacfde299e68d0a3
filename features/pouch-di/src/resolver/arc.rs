use std::{any::type_name, sync::Arc};

use crate::{
    container::Container, errors::ContainerError, resolver::Resolver, types::Injectable,
};

impl<T: Injectable> Resolver for Arc<T> {
    fn resolve(container: &Container, id: &str) -> Result<Self, ContainerError> {
        container
            .get_value(id)?
            .downcast::<T>()
            .map_err(|actual_type| {
                tracing::debug!("'{}' is a {}, not a {}", id, actual_type, type_name::<T>());
                ContainerError::DowncastFailed {
                    required_type: type_name::<T>(),
                    actual_type,
                }
            })
    }
}

impl<Resolvable: Resolver> Resolver for Option<Resolvable> {
    fn resolve(container: &Container, id: &str) -> Result<Self, ContainerError> {
        match Resolvable::resolve(container, id) {
            Ok(resolved) => Ok(Some(resolved)),
            // Only a missing `id` itself is optional, missing dependencies of a service still fail
            Err(ContainerError::UndefinedIdentifier(missing)) if missing == id => Ok(None),
            Err(e) => Err(e),
        }
    }
}
