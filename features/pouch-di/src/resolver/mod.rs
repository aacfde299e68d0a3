use crate::{container::Container, errors::ContainerError};

pub mod arc;

/// Allows custom behaviour on resolution
///
/// Implemented for `Arc<T>` and `Option<R>`, other crates implement it for their
/// own wrapper types.
pub trait Resolver: Sized {
    fn resolve(container: &Container, id: &str) -> Result<Self, ContainerError>;
}
