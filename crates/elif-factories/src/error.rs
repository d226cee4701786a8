//! Error types for factory registration and building
//!
//! Lookup failures and construction failures are kept apart so a caller can
//! tell a misspelled factory name from a type that rejects its attributes.

use crate::key::FactoryKey;
use thiserror::Error;

/// Result type alias for factory operations
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors raised by the factory registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// A registration target was not a type handle
    #[error("'{target}' is not a type handle")]
    IllegalClass { target: String },

    /// No factory matches the requested type, or the requested factory name
    #[error("{}", unregistered_message(.type_name, .factory))]
    UnregisteredFactory {
        type_name: String,
        factory: Option<FactoryKey>,
    },

    /// The target type refused the merged attributes
    #[error("'{type_name}' cannot be instantiated ({message})")]
    CannotInstantiate { type_name: String, message: String },
}

fn unregistered_message(type_name: &str, factory: &Option<FactoryKey>) -> String {
    match factory {
        Some(factory) => format!(
            "'{}' is not a registered factory for '{}'",
            factory, type_name
        ),
        None => format!("'{}' does not have registered factories", type_name),
    }
}

impl FactoryError {
    pub(crate) fn unregistered_type(type_name: &str) -> Self {
        FactoryError::UnregisteredFactory {
            type_name: type_name.to_string(),
            factory: None,
        }
    }

    pub(crate) fn unregistered_factory(type_name: &str, factory: &FactoryKey) -> Self {
        FactoryError::UnregisteredFactory {
            type_name: type_name.to_string(),
            factory: Some(factory.clone()),
        }
    }

    pub(crate) fn cannot_instantiate(type_name: &str, cause: impl std::fmt::Display) -> Self {
        FactoryError::CannotInstantiate {
            type_name: type_name.to_string(),
            message: cause.to_string(),
        }
    }

    /// Check if the error came from registering a non-type target
    pub fn is_illegal_class(&self) -> bool {
        matches!(self, FactoryError::IllegalClass { .. })
    }

    /// Check if the error came from a missing type or factory
    pub fn is_unregistered(&self) -> bool {
        matches!(self, FactoryError::UnregisteredFactory { .. })
    }

    /// Check if the error came from the target type's own construction
    pub fn is_instantiation_failure(&self) -> bool {
        matches!(self, FactoryError::CannotInstantiate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_type_message() {
        let err = FactoryError::unregistered_type("app::User");
        assert_eq!(
            err.to_string(),
            "'app::User' does not have registered factories"
        );
        assert!(err.is_unregistered());
    }

    #[test]
    fn test_unregistered_factory_message() {
        let err = FactoryError::unregistered_factory("app::User", &FactoryKey::named("admin"));
        assert_eq!(
            err.to_string(),
            "'admin' is not a registered factory for 'app::User'"
        );
    }

    #[test]
    fn test_cannot_instantiate_keeps_cause_text() {
        let err = FactoryError::cannot_instantiate("app::User", "unknown field `foo`");
        assert_eq!(
            err.to_string(),
            "'app::User' cannot be instantiated (unknown field `foo`)"
        );
        assert!(err.is_instantiation_failure());
        assert!(!err.is_unregistered());
    }

    #[test]
    fn test_illegal_class_message() {
        let err = FactoryError::IllegalClass {
            target: "not-a-class".to_string(),
        };
        assert_eq!(err.to_string(), "'not-a-class' is not a type handle");
        assert!(err.is_illegal_class());
    }
}
