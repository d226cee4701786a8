//! Capture of factory defaults from a declaration block
//!
//! A block receives an [`AttributeCollector`] and assigns attributes through
//! [`AttributeCollector::set`]. Any attribute name is accepted, keywords
//! included; the only reserved operation is [`AttributeCollector::factory`],
//! which names the factory being declared.

use crate::key::FactoryKey;
use serde_json::Value;

/// Ordered attribute mapping handed to a type's constructor
pub type Attributes = serde_json::Map<String, Value>;

/// Collects attribute assignments made inside a defaults block
#[derive(Debug, Default, Clone)]
pub struct AttributeCollector {
    factory: FactoryKey,
    attributes: Attributes,
    declared_factory: bool,
}

impl AttributeCollector {
    /// Run `defaults` against a fresh collector and return what it captured
    pub fn capture<F>(defaults: F) -> Self
    where
        F: FnOnce(&mut AttributeCollector),
    {
        let mut collector = Self::default();
        defaults(&mut collector);
        collector
    }

    /// Set attribute `name` to `value`
    ///
    /// Re-assigning a name keeps its original position and replaces the value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Declare the factory name and capture its attributes from `defaults`
    pub fn factory<F>(&mut self, name: impl Into<String>, defaults: F) -> &mut Self
    where
        F: FnOnce(&mut AttributeCollector),
    {
        let name = name.into();
        if self.declared_factory {
            tracing::warn!(
                "Factory '{}' redeclared as '{}' within one registration block",
                self.factory,
                name
            );
        }

        self.factory = FactoryKey::Named(name);
        self.declared_factory = true;
        defaults(self);
        self
    }

    /// Factory key captured by the block, `FactoryKey::Default` if none was declared
    pub fn factory_key(&self) -> &FactoryKey {
        &self.factory
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_parts(self) -> (FactoryKey, Attributes) {
        (self.factory, self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capture_default_factory() {
        let collector = AttributeCollector::capture(|c| {
            c.set("name", "foo").set("age", "29");
        });

        assert!(collector.factory_key().is_default());
        assert_eq!(collector.attributes().get("name"), Some(&json!("foo")));
        assert_eq!(collector.attributes().get("age"), Some(&json!("29")));
    }

    #[test]
    fn test_capture_preserves_assignment_order() {
        let collector = AttributeCollector::capture(|c| {
            c.set("zeta", 1).set("alpha", 2).set("mid", 3);
        });

        let keys: Vec<&str> = collector.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_reassignment_replaces_value_in_place() {
        let collector = AttributeCollector::capture(|c| {
            c.set("name", "first").set("age", 1).set("name", "second");
        });

        let keys: Vec<&str> = collector.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(collector.attributes()["name"], json!("second"));
    }

    #[test]
    fn test_keyword_names_are_plain_attributes() {
        let collector = AttributeCollector::capture(|c| {
            c.set("type", "admin").set("fn", true).set("match", json!(null));
        });

        assert_eq!(collector.attributes().len(), 3);
        assert_eq!(collector.attributes()["type"], json!("admin"));
    }

    #[test]
    fn test_named_factory_shares_mapping() {
        let collector = AttributeCollector::capture(|c| {
            c.set("outer", 1);
            c.factory("special", |c| {
                c.set("name", "Obama").set("age", "60");
            });
        });

        assert_eq!(collector.factory_key(), &FactoryKey::named("special"));
        assert_eq!(
            collector.attributes(),
            json!({"outer": 1, "name": "Obama", "age": "60"})
                .as_object()
                .unwrap()
        );
    }

    #[test]
    fn test_last_factory_declaration_wins() {
        let (key, attributes) = AttributeCollector::capture(|c| {
            c.factory("first", |c| {
                c.set("a", 1);
            });
            c.factory("second", |c| {
                c.set("b", 2);
            });
        })
        .into_parts();

        assert_eq!(key, FactoryKey::named("second"));
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn test_empty_block_captures_nothing() {
        let collector = AttributeCollector::capture(|_| {});
        assert!(collector.factory_key().is_default());
        assert!(collector.attributes().is_empty());
    }
}
