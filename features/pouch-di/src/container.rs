use std::{fmt::Debug, sync::Arc};

use indexmap::IndexMap;

use crate::{
    decorate,
    errors::ContainerError,
    factories::{Decorator, Definition, Entry},
    resolver::Resolver,
    types::{Injectable, Value},
};

/// Keyed registry of parameters and service definitions
///
/// Resolution borrows the container shared while every mutation needs `&mut`,
/// so an entry can't be replaced while it is being resolved.
///
/// The container is `Send + Sync`. Shared definitions are not safe for concurrent
/// first use without external synchronization, see [Container::share].
#[derive(Clone, Default)]
pub struct Container {
    entries: IndexMap<String, Entry>,
}
impl Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("Container");
        for (id, entry) in &self.entries {
            map.field(id, &entry.kind());
        }
        map.finish()
    }
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter or a service, overwriting any previous entry
    ///
    /// An overwritten shared service loses its cached instance.
    pub fn set(&mut self, id: impl Into<String>, entry: impl Into<Entry>) {
        let id = id.into();
        let entry = entry.into();
        tracing::debug!("Setting {} '{}'", entry.kind(), id);
        self.entries.insert(id, entry);
    }

    /// Resolves and downcasts an entry
    pub fn get<T: Injectable>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        self.resolve::<Arc<T>>(id)
    }

    /// Resolves an entry using the given [Resolver]
    pub fn resolve<R: Resolver>(&self, id: &str) -> Result<R, ContainerError> {
        R::resolve(self, id)
    }

    /// Resolves an entry without downcasting
    ///
    /// Parameters are returned as is, services are invoked with the container
    /// and protected callables resolve to their [Definition].
    pub fn get_value(&self, id: &str) -> Result<Value, ContainerError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ContainerError::UndefinedIdentifier(id.to_owned()))?;

        tracing::trace!("Resolving {} '{}'", entry.kind(), id);
        match entry {
            Entry::Parameter(value) => Ok(value.clone()),
            Entry::Service(definition) => definition.call(self),
            Entry::Protected(definition) => Ok(Value::new(definition.clone())),
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns the stored entry without resolving it
    pub fn raw(&self, id: &str) -> Result<Entry, ContainerError> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::UndefinedIdentifier(id.to_owned()))
    }

    /// Removes an entry, does nothing if it isn't defined
    pub fn unset(&mut self, id: &str) {
        if let Some(entry) = self.entries.shift_remove(id) {
            tracing::debug!("Removed {} '{}'", entry.kind(), id);
        }
    }

    /// All defined identifiers in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extends a service definition with a decorator
    ///
    /// The decorator receives the resolved original and the container, its result
    /// becomes the resolved value. The new definition is stored under `id` and returned.
    /// Extending a shared service keeps it shared.
    ///
    /// ```rust
    /// use pouch_di::{Container, Entry};
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.set("greeting", Entry::service(|_| Ok("Hello".to_string())));
    /// container.set("name", Entry::parameter("World".to_string()));
    ///
    /// container
    ///     .extend("greeting", |greeting: Arc<String>, c| {
    ///         Ok(format!("{greeting}, {}!", c.get::<String>("name")?))
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(*container.get::<String>("greeting").unwrap(), "Hello, World!");
    /// ```
    ///
    /// # Errors
    /// - [ContainerError::UndefinedIdentifier] if `id` is not defined
    /// - [ContainerError::NotAService] if `id` holds a parameter
    pub fn extend<T, U, F>(&mut self, id: &str, decorator: F) -> Result<Entry, ContainerError>
    where
        T: Injectable,
        U: Injectable,
        F: Fn(Arc<T>, &Container) -> Result<U, ContainerError> + Send + Sync + 'static,
    {
        let original = self.extendable(id)?;
        Ok(self.install_extension(id, original, Decorator::new(decorator)))
    }

    /// Extends a service definition with a decorator held in a [Value]
    ///
    /// # Errors
    /// - [ContainerError::UndefinedIdentifier] if `id` is not defined
    /// - [ContainerError::NotAService] if `id` holds a parameter
    /// - [ContainerError::InvalidCallable] if `decorator` does not hold a [Decorator]
    pub fn extend_with(&mut self, id: &str, decorator: Value) -> Result<Entry, ContainerError> {
        let original = self.extendable(id)?;
        let decorator = decorator
            .downcast::<Decorator>()
            .map_err(|_| ContainerError::InvalidCallable(decorator.type_info()))?;

        Ok(self.install_extension(id, original, Decorator::clone(&decorator)))
    }

    fn install_extension(&mut self, id: &str, original: Definition, decorator: Decorator) -> Entry {
        let entry = Entry::Service(decorate::extend(original, decorator));
        tracing::debug!("Extended {} '{}'", entry.kind(), id);
        self.entries.insert(id.to_owned(), entry.clone());
        entry
    }

    /// The definition a decorator would wrap
    ///
    /// A protected callable is extended as a definition resolving to the callable.
    fn extendable(&self, id: &str) -> Result<Definition, ContainerError> {
        match self.entries.get(id) {
            None => Err(ContainerError::UndefinedIdentifier(id.to_owned())),
            Some(Entry::Parameter(_)) => Err(ContainerError::NotAService(id.to_owned())),
            Some(Entry::Service(definition)) => Ok(definition.clone()),
            Some(Entry::Protected(definition)) => {
                Ok(Definition::constant(Value::new(definition.clone())))
            }
        }
    }
}

impl<Id: Into<String>> FromIterator<(Id, Entry)> for Container {
    fn from_iter<I: IntoIterator<Item = (Id, Entry)>>(iter: I) -> Self {
        Container {
            entries: iter
                .into_iter()
                .map(|(id, entry)| (id.into(), entry))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_round_trip() {
        let mut container = Container::new();
        container.set("cookie_name", Entry::parameter("SESSION_ID".to_string()));
        container.set("retries", Value::new(0_u8));

        assert_eq!(*container.get::<String>("cookie_name").unwrap(), "SESSION_ID");
        assert_eq!(*container.get::<u8>("retries").unwrap(), 0);
    }

    #[test]
    fn services_see_the_container() {
        let mut container = Container::new();
        container.set("cookie_name", Entry::parameter("SESSION_ID".to_string()));
        container.set(
            "session_storage",
            Entry::service(|c| Ok(format!("storage({})", c.get::<String>("cookie_name")?))),
        );

        assert_eq!(
            *container.get::<String>("session_storage").unwrap(),
            "storage(SESSION_ID)"
        );
    }

    #[test]
    fn missing_dependency_surfaces_from_factory() {
        let mut container = Container::new();
        container.set(
            "log",
            Entry::service(|c| Ok(format!("log:{}", c.get::<String>("log_file")?))),
        );

        let err = container.get::<String>("log").unwrap_err();
        assert!(matches!(err, ContainerError::UndefinedIdentifier(id) if id == "log_file"));
    }

    #[test]
    fn wrong_type_is_reported() {
        let mut container = Container::new();
        container.set("port", Entry::parameter(8080_u16));

        let err = container.get::<String>("port").unwrap_err();
        assert!(matches!(err, ContainerError::DowncastFailed { actual_type: "u16", .. }));
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut container = Container::new();
        container.set("b", Entry::parameter(1));
        container.set("a", Entry::parameter(2));
        container.set("c", Entry::parameter(3));
        container.set("b", Entry::parameter(4));
        container.unset("a");

        assert_eq!(container.keys(), ["b", "c"]);
        assert_eq!(*container.get::<i32>("b").unwrap(), 4);
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn unset_is_idempotent() {
        let mut container = Container::new();
        container.set("param", Entry::parameter(1));
        container.unset("param");
        container.unset("param");

        assert!(!container.has("param"));
        assert!(container.is_empty());
    }

    #[test]
    fn extend_with_requires_a_decorator() {
        let mut container = Container::new();
        container.set("mail", Entry::service(|_| Ok("mail".to_string())));

        let err = container
            .extend_with("mail", Value::new("not callable".to_string()))
            .unwrap_err();
        assert!(matches!(err, ContainerError::InvalidCallable(_)));
        assert_eq!(*container.get::<String>("mail").unwrap(), "mail");

        let decorator = Decorator::new(|mail: Arc<String>, _| Ok(format!("{mail}+from")));
        container.extend_with("mail", Value::new(decorator)).unwrap();
        assert_eq!(*container.get::<String>("mail").unwrap(), "mail+from");
    }

    #[test]
    fn extend_checks_target_before_decorator() {
        let mut container = Container::new();
        container.set("param", Entry::parameter(1));

        let missing = container.extend_with("missing", Value::new(1)).unwrap_err();
        assert!(missing.is_undefined());

        let not_service = container.extend_with("param", Value::new(1)).unwrap_err();
        assert!(matches!(not_service, ContainerError::NotAService(id) if id == "param"));
    }

    #[test]
    fn debug_lists_kinds_without_resolving() {
        let mut container = Container::new();
        container.set("param", Entry::parameter(1));
        container.set(
            "boom",
            Entry::service(|_| -> Result<(), _> { panic!("must not be resolved") }),
        );

        let debug = format!("{container:?}");
        assert!(debug.contains("param: \"parameter\""));
        assert!(debug.contains("boom: \"service\""));
    }

    #[test]
    fn collects_from_entries() {
        let container: Container = [
            ("cookie_name", Entry::parameter("SESSION_ID".to_string())),
            ("random", Entry::protected(|_| Ok(4_u32))),
        ]
        .into_iter()
        .collect();

        assert_eq!(container.keys(), ["cookie_name", "random"]);
    }
}
