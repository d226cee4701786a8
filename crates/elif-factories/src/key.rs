//! Keys used by the registry: type handles and factory names

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime handle for a registrable type
///
/// Equality and hashing use only the `TypeId`; the name is carried for
/// messages and introspection.
#[derive(Debug, Clone, Copy)]
pub struct TypeHandle {
    id: TypeId,
    name: &'static str,
}

impl TypeHandle {
    /// Create the handle for `T`
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path, e.g. `User` for `app::models::User`
    ///
    /// Only the outer path of a named type is stripped; generic arguments stay
    /// fully qualified. Tuples, references, slices and arrays are returned
    /// unchanged.
    pub fn short_name(&self) -> &'static str {
        if self.name.starts_with(['(', '&', '[', '*']) {
            return self.name;
        }

        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(idx) => &self.name[idx + 2..],
            None => self.name,
        }
    }

    /// Check whether this handle was created for `T`
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Key of a factory inside a type's factory table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FactoryKey {
    /// The unnamed factory used when a build names none
    #[default]
    Default,
    Named(String),
}

impl FactoryKey {
    pub fn named(name: impl Into<String>) -> Self {
        FactoryKey::Named(name.into())
    }

    pub fn is_default(&self) -> bool {
        matches!(self, FactoryKey::Default)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            FactoryKey::Default => None,
            FactoryKey::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for FactoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryKey::Default => write!(f, "<default>"),
            FactoryKey::Named(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for FactoryKey {
    fn from(name: &str) -> Self {
        FactoryKey::named(name)
    }
}

impl From<String> for FactoryKey {
    fn from(name: String) -> Self {
        FactoryKey::Named(name)
    }
}

impl From<Option<String>> for FactoryKey {
    fn from(name: Option<String>) -> Self {
        name.map_or(FactoryKey::Default, FactoryKey::Named)
    }
}
