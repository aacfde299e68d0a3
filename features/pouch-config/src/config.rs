use std::{ops::Deref, sync::Arc};

use pouch_di::{Container, ContainerError, Injectable, Resolver};

use crate::provider::config_key;

/// A wrapper type to allow for config injections
///
/// This provides a simple way to retrieve configs installed by a
/// [crate::provider::ConfigProvider] from within service factories
///
/// # Example
/// ```rust
/// use pouch_config::{Config, ConfigProvider};
/// use pouch_di::{Container, Entry};
///
/// pub struct MailConfig {
///     default_address: String,
/// }
///
/// let mut provider = ConfigProvider::new();
/// provider
///     .add_config(MailConfig { default_address: "admin@example.com".into() })
///     .unwrap();
///
/// let mut container = Container::new();
/// provider.install(&mut container);
/// container.set(
///     "mail.from",
///     Entry::service(|c| Ok(Config::<MailConfig>::load(c)?.default_address.clone())),
/// );
///
/// assert_eq!(*container.get::<String>("mail.from").unwrap(), "admin@example.com");
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Config {
            inner: self.inner.clone(),
        }
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Injectable> Config<T> {
    /// Loads the config installed under its [config_key]
    ///
    /// # Errors
    /// [ContainerError::UndefinedIdentifier] if the config was never installed
    pub fn load(container: &Container) -> Result<Self, ContainerError> {
        container.resolve(config_key::<T>())
    }
}

impl<T: Injectable> Resolver for Config<T> {
    fn resolve(container: &Container, id: &str) -> Result<Self, ContainerError> {
        let inner = Arc::<T>::resolve(container, id)?;
        Ok(Config { inner })
    }
}
