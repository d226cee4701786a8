//! Factory registry
//!
//! Stores default attributes per type and per factory name, and builds
//! instances by merging caller overrides onto those defaults.

use crate::collector::{AttributeCollector, Attributes};
use crate::config::{FactoryConfig, OverwritePolicy};
use crate::error::{FactoryError, FactoryResult};
use crate::key::{FactoryKey, TypeHandle};
use crate::request::BuildRequest;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Factories registered for a single type
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryTable {
    type_handle: TypeHandle,
    factories: HashMap<FactoryKey, Attributes>,
}

impl FactoryTable {
    fn new(type_handle: TypeHandle) -> Self {
        Self {
            type_handle,
            factories: HashMap::new(),
        }
    }

    pub fn type_handle(&self) -> TypeHandle {
        self.type_handle
    }

    pub fn type_name(&self) -> &'static str {
        self.type_handle.name()
    }

    /// Default attributes stored under `factory`
    pub fn get(&self, factory: &FactoryKey) -> Option<&Attributes> {
        self.factories.get(factory)
    }

    pub fn contains(&self, factory: &FactoryKey) -> bool {
        self.factories.contains_key(factory)
    }

    pub fn keys(&self) -> impl Iterator<Item = &FactoryKey> {
        self.factories.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactoryKey, &Attributes)> {
        self.factories.iter()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Registry of attribute factories keyed by type, then by factory name
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    types: HashMap<TypeHandle, FactoryTable>,
    config: FactoryConfig,
}

impl FactoryRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self {
            types: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FactoryConfig) {
        self.config = config;
    }

    /// Register defaults for `T` captured from `defaults`
    ///
    /// Other factories already registered for `T` are kept. Registering the
    /// same factory name again replaces its defaults.
    pub fn register<T, F>(&mut self, defaults: F)
    where
        T: Any,
        F: FnOnce(&mut AttributeCollector),
    {
        self.insert(TypeHandle::of::<T>(), AttributeCollector::capture(defaults));
    }

    /// Register defaults for a type given at runtime
    ///
    /// `target` must be a [`TypeHandle`]. Any other value fails with
    /// [`FactoryError::IllegalClass`] before `defaults` runs.
    pub fn register_dyn<F>(&mut self, target: &dyn Any, defaults: F) -> FactoryResult<()>
    where
        F: FnOnce(&mut AttributeCollector),
    {
        let type_handle = target_handle(target)?;
        self.insert(type_handle, AttributeCollector::capture(defaults));
        Ok(())
    }

    pub(crate) fn insert(&mut self, type_handle: TypeHandle, collector: AttributeCollector) {
        let (factory, attributes) = collector.into_parts();
        tracing::debug!(
            "Registering factory '{}' for '{}' with {} attribute(s)",
            factory,
            type_handle,
            attributes.len()
        );

        let table = self
            .types
            .entry(type_handle)
            .or_insert_with(|| FactoryTable::new(type_handle));

        let previous = table.factories.insert(factory.clone(), attributes);
        if previous.is_some() && self.config.overwrite_policy == OverwritePolicy::Warn {
            tracing::warn!(
                "Factory '{}' for '{}' was already registered; replacing its defaults",
                factory,
                type_handle
            );
        }
    }

    /// Merge the request's overrides onto the registered defaults for `T`
    ///
    /// Fails with [`FactoryError::UnregisteredFactory`] if `T` or the
    /// requested factory is unknown. Stored defaults are never modified.
    pub fn resolve<T: Any>(&self, request: &BuildRequest) -> FactoryResult<Attributes> {
        self.resolve_for(TypeHandle::of::<T>(), request)
    }

    fn resolve_for(&self, type_handle: TypeHandle, request: &BuildRequest) -> FactoryResult<Attributes> {
        let table = self
            .types
            .get(&type_handle)
            .filter(|table| !table.is_empty())
            .ok_or_else(|| FactoryError::unregistered_type(type_handle.name()))?;

        let defaults = table
            .get(&request.factory)
            .ok_or_else(|| FactoryError::unregistered_factory(type_handle.name(), &request.factory))?;

        let mut attributes = defaults.clone();
        for (key, value) in &request.overrides {
            attributes.insert(key.clone(), value.clone());
        }

        tracing::trace!(
            "Resolved factory '{}' for '{}' ({} default(s), {} override(s))",
            request.factory,
            type_handle,
            defaults.len(),
            request.overrides.len()
        );

        Ok(attributes)
    }

    /// Build `T` by deserializing the merged attributes
    pub fn build<T>(&self, request: impl Into<BuildRequest>) -> FactoryResult<T>
    where
        T: DeserializeOwned + Any,
    {
        self.build_with(request, instantiate::<T>)
    }

    /// Build `T` from its default factory
    pub fn build_default<T>(&self, overrides: Option<Attributes>) -> FactoryResult<T>
    where
        T: DeserializeOwned + Any,
    {
        self.build(BuildRequest::new().overrides(overrides.unwrap_or_default()))
    }

    /// Build `T` from the factory registered under `name`
    pub fn build_named<T>(&self, name: &str, overrides: Option<Attributes>) -> FactoryResult<T>
    where
        T: DeserializeOwned + Any,
    {
        self.build(BuildRequest::named(name).overrides(overrides.unwrap_or_default()))
    }

    /// Build `T` with an explicit constructor
    ///
    /// Only errors returned by `construct` are wrapped into
    /// [`FactoryError::CannotInstantiate`]; lookup errors pass through as-is.
    pub fn build_with<T, F, E>(&self, request: impl Into<BuildRequest>, construct: F) -> FactoryResult<T>
    where
        T: Any,
        F: FnOnce(Attributes) -> Result<T, E>,
        E: fmt::Display,
    {
        let attributes = self.resolve::<T>(&request.into())?;
        construct_with(attributes, construct)
    }

    /// Build `count` instances of `T` from the same request
    pub fn build_many<T>(&self, count: usize, request: impl Into<BuildRequest>) -> FactoryResult<Vec<T>>
    where
        T: DeserializeOwned + Any,
    {
        let attributes = self.resolve::<T>(&request.into())?;
        construct_many(count, attributes)
    }

    /// All registered factory tables
    pub fn registered(&self) -> &HashMap<TypeHandle, FactoryTable> {
        &self.types
    }

    /// Factory table for `T`, if any factory is registered
    pub fn factories<T: Any>(&self) -> Option<&FactoryTable> {
        self.types.get(&TypeHandle::of::<T>())
    }

    /// Stored defaults for `T` under `factory`
    pub fn defaults<T: Any>(&self, factory: &FactoryKey) -> Option<&Attributes> {
        self.factories::<T>().and_then(|table| table.get(factory))
    }

    pub fn is_registered<T: Any>(&self) -> bool {
        self.factories::<T>().is_some_and(|table| !table.is_empty())
    }

    /// Remove every factory registered for `T`
    pub fn unregister<T: Any>(&mut self) -> Option<FactoryTable> {
        self.types.remove(&TypeHandle::of::<T>())
    }

    /// Remove every registered factory
    pub fn clear(&mut self) {
        self.types.clear();
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub(crate) fn instantiate<T: DeserializeOwned>(attributes: Attributes) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(attributes))
}

/// Run `construct` on resolved attributes, wrapping its failure
pub(crate) fn construct_with<T, F, E>(attributes: Attributes, construct: F) -> FactoryResult<T>
where
    T: Any,
    F: FnOnce(Attributes) -> Result<T, E>,
    E: fmt::Display,
{
    construct(attributes).map_err(|err| {
        let type_handle = TypeHandle::of::<T>();
        tracing::debug!("Failed to instantiate '{}': {}", type_handle, err);
        FactoryError::cannot_instantiate(type_handle.name(), err)
    })
}

pub(crate) fn construct_many<T>(count: usize, attributes: Attributes) -> FactoryResult<Vec<T>>
where
    T: DeserializeOwned + Any,
{
    let mut results = Vec::with_capacity(count);
    for _ in 0..count {
        results.push(construct_with(attributes.clone(), instantiate::<T>)?);
    }
    Ok(results)
}

/// Resolve a registration target to its type handle
pub(crate) fn target_handle(target: &dyn Any) -> FactoryResult<TypeHandle> {
    target
        .downcast_ref::<TypeHandle>()
        .copied()
        .ok_or_else(|| FactoryError::IllegalClass {
            target: describe_target(target),
        })
}

fn describe_target(target: &dyn Any) -> String {
    if let Some(text) = target.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = target.downcast_ref::<String>() {
        text.clone()
    } else {
        "<non-type value>".to_string()
    }
}
