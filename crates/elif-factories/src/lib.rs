//! # elif-factories - Declarative Test Factories
//!
//! Register named sets of default attributes for a type once, then build
//! instances by merging per-test overrides onto those defaults.
//!
//! ## Features
//!
//! - **Factories per type**: a default factory plus any number of named ones
//! - **Overrides**: caller attributes win over registered defaults
//! - **Typed errors**: missing factories are reported apart from types
//!   that reject their attributes
//! - **Explicit or global registry**: inject a [`FactoryRegistry`] or use the
//!   process-wide one in [`global`]
//!
//! ## Quick Start
//!
//! ```rust
//! use elif_factories::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut registry = FactoryRegistry::new();
//! registry.register::<User, _>(|c| {
//!     c.set("name", "foo").set("age", 29);
//! });
//! registry.register::<User, _>(|c| {
//!     c.factory("senior", |c| {
//!         c.set("name", "old foo").set("age", 90);
//!     });
//! });
//!
//! let user: User = registry.build(attrs! { name: "bar" }).unwrap();
//! assert_eq!(user.name, "bar");
//! assert_eq!(user.age, 29);
//!
//! let senior: User = registry.build_named("senior", None).unwrap();
//! assert_eq!(senior.age, 90);
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod global;
pub mod key;
mod macros;
pub mod registry;
pub mod request;

// Re-export commonly used types
pub use collector::{AttributeCollector, Attributes};
pub use config::{ConfigError, FactoryConfig, OverwritePolicy};
pub use error::{FactoryError, FactoryResult};
pub use key::{FactoryKey, TypeHandle};
pub use registry::{FactoryRegistry, FactoryTable};
pub use request::BuildRequest;
pub use serde_json::Value as JsonValue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        attrs, register_factory, AttributeCollector, Attributes, BuildRequest, FactoryError,
        FactoryKey, FactoryRegistry, FactoryResult, TypeHandle,
    };

    pub use serde_json::{json, Value as JsonValue};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_is_set() {
        assert!(!super::VERSION.is_empty());
    }
}
