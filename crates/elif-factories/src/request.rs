//! Build requests: which factory to use and which attributes to override

use crate::collector::Attributes;
use crate::key::FactoryKey;
use serde_json::Value;

/// A request to build an instance from a registered factory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildRequest {
    pub factory: FactoryKey,
    pub overrides: Attributes,
}

impl BuildRequest {
    /// Request the default factory with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the factory registered under `name`
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            factory: FactoryKey::named(name),
            overrides: Attributes::new(),
        }
    }

    /// Override a single attribute
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Override several attributes; later entries win over earlier ones
    pub fn overrides(mut self, overrides: Attributes) -> Self {
        self.overrides.extend(overrides);
        self
    }
}

impl From<Attributes> for BuildRequest {
    fn from(overrides: Attributes) -> Self {
        Self {
            factory: FactoryKey::Default,
            overrides,
        }
    }
}

impl From<&str> for BuildRequest {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for BuildRequest {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<FactoryKey> for BuildRequest {
    fn from(factory: FactoryKey) -> Self {
        Self {
            factory,
            overrides: Attributes::new(),
        }
    }
}
