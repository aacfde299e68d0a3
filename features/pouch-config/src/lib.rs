//! Pouch Config provides a registry of typed configs that can be installed into a
//! [pouch_di::Container] and injected into the services defined there.
//!
//! Pouch Config is split into two major parts:
//! 1. ConfigProvider: Used to create the registry of all configs and install them
//! 2. Config<T>: A wrapper type to be able to resolve and retrieve configs
//!
//! # Examples
//!
//! ```rust
//! use pouch_config::{Config, ConfigProvider};
//! use pouch_di::Container;
//!
//! #[derive(Clone)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! let app_config = AppConfig {
//!     host: "localhost".to_string(),
//!     port: 8080_u16,
//! };
//!
//! let mut config_provider = ConfigProvider::new();
//! if let Err(e) = config_provider.add_config(app_config.clone()) {
//!     eprintln!("{e}");
//!     return;
//! }
//!
//! let mut container = Container::new();
//! config_provider.install(&mut container);
//!
//! let retrieved = Config::<AppConfig>::load(&container).unwrap();
//! assert_eq!(app_config.host, retrieved.host);
//! assert_eq!(app_config.port, retrieved.port);
//! ```

pub mod config;
pub mod errors;
pub mod provider;

pub use config::Config;
pub use errors::ConfigError;
pub use provider::{config_key, ConfigProvider};
