use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    sync::Arc,
};

use pouch_di::{Container, Entry, TypeInfo, Value};

use crate::errors::ConfigError;

/// Identifier under which a config of type `T` is stored in a [Container]
pub fn config_key<T: 'static + ?Sized>() -> &'static str {
    type_name::<T>()
}

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type, and installed into a
/// [Container] as parameters.
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, Value>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a config with specified type.
    ///
    /// Returns `None` if no config of that type was registered
    pub fn get_config<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        // Keyed by TypeId, so the stored value always is a `T`
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Retrieve a config which must have been registered.
    ///
    /// If the config type is not registered, it will return a [`ConfigError::Missing`]
    pub fn require_config<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ConfigError> {
        self.get_config()
            .ok_or_else(|| ConfigError::Missing(TypeInfo::of::<T>()))
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return a
    /// [`ConfigError`] runtime error
    pub fn add_config<T: Send + Sync + 'static>(
        &mut self,
        config: T,
    ) -> Result<&mut Self, ConfigError> {
        let type_id = TypeId::of::<T>();

        if self.configs.contains_key(&type_id) {
            return Err(ConfigError::AlreadyRegistered(TypeInfo::of::<T>()));
        }

        self.configs.insert(type_id, Value::new(config));
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Send + Sync + 'static>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Stores every config as a parameter under its [config_key]
    ///
    /// Configs are installed ordered by key. Existing entries under the same key are overwritten.
    pub fn install(&self, container: &mut Container) {
        let mut configs: Vec<_> = self.configs.values().collect();
        configs.sort_by_key(|value| value.type_info().type_name);

        for value in configs {
            container.set(value.type_info().type_name, Entry::Parameter(value.clone()));
        }
        tracing::debug!("Installed {} configs", self.configs.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct MailConfig {
        default_address: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TwigConfig {
        debug: bool,
    }

    #[test]
    fn add_and_get() {
        let mut provider = ConfigProvider::new();
        provider
            .add_config(MailConfig {
                default_address: "admin@example.com".into(),
            })
            .unwrap()
            .maybe_add_config::<TwigConfig>(None)
            .unwrap();

        let mail = provider.get_config::<MailConfig>().unwrap();
        assert_eq!(mail.default_address, "admin@example.com");
        assert!(provider.get_config::<TwigConfig>().is_none());
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut provider = ConfigProvider::new();
        provider.add_config(TwigConfig { debug: true }).unwrap();

        let err = provider
            .add_config(TwigConfig { debug: false })
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyRegistered(info) if info == TypeInfo::of::<TwigConfig>()));
        assert!(provider.get_config::<TwigConfig>().unwrap().debug);
    }

    #[test]
    fn require_reports_missing() {
        let mut provider = ConfigProvider::new();
        provider.add_config(TwigConfig { debug: false }).unwrap();

        assert!(!provider.require_config::<TwigConfig>().unwrap().debug);
        let err = provider.require_config::<MailConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Missing(info) if info == TypeInfo::of::<MailConfig>()));
    }

    #[test]
    fn install_sets_parameters() {
        let mut provider = ConfigProvider::new();
        provider
            .add_config(TwigConfig { debug: true })
            .unwrap()
            .add_config(MailConfig {
                default_address: "admin@example.com".into(),
            })
            .unwrap();

        let mut container = Container::new();
        provider.install(&mut container);

        let mut expected = vec![config_key::<MailConfig>(), config_key::<TwigConfig>()];
        expected.sort();
        assert_eq!(container.keys(), expected);
        assert_eq!(container.raw(config_key::<TwigConfig>()).unwrap().kind(), "parameter");

        let twig = container.get::<TwigConfig>(config_key::<TwigConfig>()).unwrap();
        assert_eq!(*twig, TwigConfig { debug: true });
    }
}
