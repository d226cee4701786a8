//! Declarative sugar over [`AttributeCollector::set`](crate::AttributeCollector::set)
//!
//! Attribute keys are single tokens. Identifiers and keywords are used as
//! written (`type: "admin"` sets `"type"`); string literals are used as-is.

/// Build an [`Attributes`](crate::Attributes) mapping
///
/// ```rust
/// use elif_factories::attrs;
///
/// let overrides = attrs! { name: "bar", type: "admin", "display-name": "Bar" };
/// assert_eq!(overrides.len(), 3);
/// assert_eq!(overrides["type"], "admin");
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:tt : $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::Attributes::new();
        $(
            attributes.insert(
                ::std::string::String::from($crate::__attribute_key!($key)),
                ::std::convert::Into::<$crate::JsonValue>::into($value),
            );
        )+
        attributes
    }};
}

/// Register factory defaults with struct-like syntax
///
/// `Type as name { .. }` declares a named factory. Prefix with
/// `registry =>` to target a specific registry; without it the
/// process-wide registry is used.
///
/// ```rust
/// use elif_factories::{register_factory, FactoryKey, FactoryRegistry};
///
/// struct User;
///
/// let mut registry = FactoryRegistry::new();
/// register_factory!(registry => User { name: "foo", age: 29 });
/// register_factory!(registry => User as admin { name: "root", role: "admin" });
///
/// assert_eq!(registry.factories::<User>().unwrap().len(), 2);
/// assert!(registry.defaults::<User>(&FactoryKey::named("admin")).is_some());
/// ```
#[macro_export]
macro_rules! register_factory {
    ($ty:ty { $($key:tt : $value:expr),* $(,)? }) => {
        $crate::global::register::<$ty, _>(|collector| {
            $( collector.set($crate::__attribute_key!($key), $value); )*
        })
    };
    ($ty:ty as $factory:tt { $($key:tt : $value:expr),* $(,)? }) => {
        $crate::global::register::<$ty, _>(|collector| {
            collector.factory($crate::__attribute_key!($factory), |collector| {
                $( collector.set($crate::__attribute_key!($key), $value); )*
            });
        })
    };
    ($registry:expr => $ty:ty { $($key:tt : $value:expr),* $(,)? }) => {
        $registry.register::<$ty, _>(|collector| {
            $( collector.set($crate::__attribute_key!($key), $value); )*
        })
    };
    ($registry:expr => $ty:ty as $factory:tt { $($key:tt : $value:expr),* $(,)? }) => {
        $registry.register::<$ty, _>(|collector| {
            collector.factory($crate::__attribute_key!($factory), |collector| {
                $( collector.set($crate::__attribute_key!($key), $value); )*
            });
        })
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribute_key {
    ($key:literal) => {
        $key
    };
    ($key:tt) => {
        stringify!($key)
    };
}

#[cfg(test)]
mod tests {
    use crate::{FactoryKey, FactoryRegistry};
    use serde_json::json;

    #[allow(dead_code)]
    struct Account;

    #[test]
    fn test_attrs_macro_keys_and_values() {
        let attributes = attrs! {
            name: "bar",
            type: "admin",
            match: true,
            "with space": 3,
        };

        let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "type", "match", "with space"]);
        assert_eq!(attributes["match"], json!(true));
        assert_eq!(attributes["with space"], json!(3));
    }

    #[test]
    fn test_attrs_macro_empty() {
        assert!(attrs!().is_empty());
    }

    #[test]
    fn test_register_factory_macro_with_registry() {
        let mut registry = FactoryRegistry::new();
        register_factory!(registry => Account { name: "foo", type: "savings" });
        register_factory!(registry => Account as special { name: "Obama", age: "60" });

        let default = registry.defaults::<Account>(&FactoryKey::Default).unwrap();
        assert_eq!(default["type"], json!("savings"));

        let special = registry
            .defaults::<Account>(&FactoryKey::named("special"))
            .unwrap();
        assert_eq!(special, json!({"name": "Obama", "age": "60"}).as_object().unwrap());
    }
}
