use std::sync::Arc;

use thiserror::Error;

use crate::types::{DynError, TypeInfo};

/// Errors reported by the container
///
/// All of them are reported at the offending call, none are recovered internally.
#[derive(Error, Debug, Clone)]
pub enum ContainerError {
    /// Lookup, raw access or extension of an unknown identifier
    #[error("Identifier \"{0}\" is not defined.")]
    UndefinedIdentifier(String),
    /// `share` was given a parameter instead of a service definition
    #[error("Service definition expected, got a parameter of type '{0}'.")]
    InvalidDefinition(TypeInfo),
    /// `protect` or `extend` was given something which can't be called
    #[error("Callable expected, got a value of type '{0}'.")]
    InvalidCallable(TypeInfo),
    /// `extend` targeted a parameter
    #[error("Identifier \"{0}\" does not contain a service definition.")]
    NotAService(String),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
    /// A service factory failed with its own error
    #[error("Service factory failed - error: {error}")]
    FactoryFailed { error: Arc<DynError> },
}

impl ContainerError {
    /// Wraps an error raised inside a service factory
    ///
    /// ```rust
    /// use pouch_di::{Container, ContainerError, Entry};
    ///
    /// let mut container = Container::new();
    /// container.set(
    ///     "port",
    ///     Entry::service(|_| "8080".parse::<u16>().map_err(ContainerError::factory)),
    /// );
    /// assert_eq!(*container.get::<u16>("port").unwrap(), 8080);
    /// ```
    pub fn factory(error: impl Into<DynError>) -> Self {
        Self::FactoryFailed {
            error: Arc::new(error.into()),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::UndefinedIdentifier(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_identifier() {
        let err = ContainerError::UndefinedIdentifier("mail".into());
        assert_eq!(err.to_string(), "Identifier \"mail\" is not defined.");

        let err = ContainerError::NotAService("cookie_name".into());
        assert_eq!(
            err.to_string(),
            "Identifier \"cookie_name\" does not contain a service definition."
        );
    }

    #[test]
    fn factory_keeps_source_message() {
        let source = "abc".parse::<u16>().unwrap_err();
        let err = ContainerError::factory(source.clone());
        assert!(err.to_string().ends_with(&source.to_string()));
        assert!(!err.is_undefined());
    }
}
