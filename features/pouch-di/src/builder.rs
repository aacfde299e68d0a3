use crate::{
    container::Container,
    errors::ContainerError,
    factories::Entry,
    types::Injectable,
};

/// Collects parameters and services before creating a [Container]
///
/// Later registrations under the same identifier replace earlier ones.
#[derive(Default)]
pub struct ContainerBuilder {
    /// Registered entries in registration order
    pub(crate) entries: Vec<(String, Entry)>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}
impl ContainerBuilder {
    pub fn entry(mut self, id: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.entries.push((id.into(), entry.into()));
        self
    }

    pub fn parameter<T: Injectable>(self, id: impl Into<String>, value: T) -> Self {
        self.entry(id, Entry::parameter(value))
    }

    pub fn service<T, F>(self, id: impl Into<String>, factory: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        self.entry(id, Entry::service(factory))
    }

    pub fn shared<T, F>(self, id: impl Into<String>, factory: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        self.entry(id, Entry::shared(factory))
    }

    pub fn protected<T, F>(self, id: impl Into<String>, callable: F) -> Self
    where
        T: Injectable,
        F: Fn(&Container) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        self.entry(id, Entry::protected(callable))
    }

    pub fn build(self) -> Container {
        tracing::debug!("Building container with {} entries", self.entries.len());
        self.entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_all_entry_kinds() {
        let container = ContainerBuilder::new()
            .parameter("cookie_name", "SESSION_ID".to_string())
            .service("session", |c| Ok(format!("session({})", c.get::<String>("cookie_name")?)))
            .shared("log", |_| Ok(Vec::<String>::new()))
            .protected("random", |_| Ok(4_u32))
            .build();

        assert_eq!(container.keys(), ["cookie_name", "session", "log", "random"]);
        assert_eq!(*container.get::<String>("session").unwrap(), "session(SESSION_ID)");
        assert_eq!(container.raw("log").unwrap().kind(), "shared service");
        assert_eq!(container.raw("random").unwrap().kind(), "protected");
    }

    #[test]
    fn later_registration_wins() {
        let container = ContainerBuilder::new()
            .parameter("a", 1)
            .parameter("b", 2)
            .parameter("a", 3)
            .build();

        assert_eq!(container.keys(), ["a", "b"]);
        assert_eq!(*container.get::<i32>("a").unwrap(), 3);
    }
}
