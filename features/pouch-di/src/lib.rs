//! Pouch DI is a small keyed service container.
//!
//! The container maps string identifiers to entries, each being one of:
//! 1. Parameter: a literal value, returned as is
//! 2. Service: a [Definition] invoked with the container on every lookup
//! 3. Protected: a [Definition] stored as a value, lookup returns the definition itself
//!
//! Services can be shared with [Container::share] (computed once, cached for the
//! lifetime of the entry) and decorated with [Container::extend].
//!
//! # Examples
//!
//! ```rust
//! use pouch_di::{Container, ContainerError, Definition, Entry};
//! use std::sync::Arc;
//!
//! struct SessionStorage {
//!     cookie_name: Arc<String>,
//! }
//! struct Session {
//!     storage: Arc<SessionStorage>,
//! }
//!
//! fn main() -> Result<(), ContainerError> {
//!     let mut container = Container::new();
//!
//!     container.set("cookie_name", Entry::parameter("SESSION_ID".to_string()));
//!     container.set(
//!         "session_storage",
//!         Entry::service(|c| {
//!             Ok(SessionStorage {
//!                 cookie_name: c.get("cookie_name")?,
//!             })
//!         }),
//!     );
//!     container.set(
//!         "session",
//!         Container::share(Entry::service(|c| {
//!             Ok(Session {
//!                 storage: c.get("session_storage")?,
//!             })
//!         }))?,
//!     );
//!     container.set("random", Entry::protected(|_| Ok(4_u32)));
//!
//!     let session = container.get::<Session>("session")?;
//!     assert_eq!(session.storage.cookie_name.as_str(), "SESSION_ID");
//!     assert!(Arc::ptr_eq(&session, &container.get::<Session>("session")?));
//!
//!     let random = container.get::<Definition>("random")?;
//!     assert_eq!(*random.call_as::<u32>(&container)?, 4);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod container;
pub mod decorate;
pub mod errors;
pub mod factories;
pub mod resolver;
pub mod types;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use errors::ContainerError;
pub use factories::{Decorator, Definition, Entry};
pub use resolver::Resolver;
pub use types::{DynError, Injectable, TypeInfo, Value};
