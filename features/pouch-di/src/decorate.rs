//! Share, protect and extend
//!
//! Every decoration produces a new [Definition] wrapping the previous one, the
//! wrapped definition is never modified.

use std::sync::{Mutex, PoisonError};

use crate::{
    container::Container,
    errors::ContainerError,
    factories::{Decorator, Definition, Entry},
    types::Value,
};

/// Singleton slot owned by one shared definition
///
/// Presence is tracked by the `Option`, never by the cached value itself.
#[derive(Default)]
struct Memo {
    slot: Mutex<Option<Value>>,
}

impl Memo {
    fn cached(&self) -> Option<Value> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores the value unless another caller was faster, returns the stored one
    fn store(&self, value: Value) -> Value {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(value)
            .clone()
    }
}

/// Wraps a definition so it is invoked once, the result is cached in the returned definition
///
/// The lock is not held while the wrapped definition runs, so the definition may
/// resolve other services. Two threads racing the first resolution may both invoke
/// it; the first stored value wins and is returned to both.
/// A failed invocation caches nothing.
pub(crate) fn share(definition: Definition) -> Definition {
    let memo = Memo::default();

    Definition::from_fn(move |container| {
        if let Some(value) = memo.cached() {
            return Ok(value);
        }

        let value = definition.call(container)?;
        tracing::debug!("Cached shared instance of {}", value.type_info());
        Ok(memo.store(value))
    })
    .into_shared()
}

/// Applies a decorator to the result of a definition
///
/// A shared definition stays shared: the composition is cached as a whole.
pub(crate) fn extend(definition: Definition, decorator: Decorator) -> Definition {
    let was_shared = definition.is_shared();
    let extended = Definition::from_fn(move |container| {
        let original = definition.call(container)?;
        decorator.call(original, container)
    });

    if was_shared {
        share(extended)
    } else {
        extended
    }
}

impl Container {
    /// Wraps a service definition so it is computed once per container entry
    ///
    /// Protected callables are returned unchanged, their resolution is already constant.
    ///
    /// ```rust
    /// use pouch_di::{Container, Entry};
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// static CALLS: AtomicUsize = AtomicUsize::new(0);
    ///
    /// let mut container = Container::new();
    /// let shared = Container::share(Entry::service(|_| Ok(CALLS.fetch_add(1, Ordering::SeqCst)))).unwrap();
    /// container.set("counter", shared);
    ///
    /// assert_eq!(*container.get::<usize>("counter").unwrap(), 0);
    /// assert_eq!(*container.get::<usize>("counter").unwrap(), 0);
    /// assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    /// ```
    ///
    /// # Errors
    /// [ContainerError::InvalidDefinition] if given a parameter
    pub fn share(entry: impl Into<Entry>) -> Result<Entry, ContainerError> {
        match entry.into() {
            Entry::Service(definition) => Ok(Entry::Service(share(definition))),
            protected @ Entry::Protected(_) => Ok(protected),
            Entry::Parameter(value) => Err(ContainerError::InvalidDefinition(value.type_info())),
        }
    }

    /// Protects a callable from being invoked on resolution
    ///
    /// Resolving the returned entry yields the [Definition] itself.
    ///
    /// # Errors
    /// [ContainerError::InvalidCallable] if given a parameter
    pub fn protect(entry: impl Into<Entry>) -> Result<Entry, ContainerError> {
        match entry.into() {
            Entry::Service(definition) | Entry::Protected(definition) => {
                Ok(Entry::Protected(definition))
            }
            Entry::Parameter(value) => Err(ContainerError::InvalidCallable(value.type_info())),
        }
    }
}
