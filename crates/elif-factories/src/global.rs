//! Process-wide factory registry
//!
//! Convenience functions over a single shared [`FactoryRegistry`]. Tests
//! that use it should call [`reset`] first and run serially.

use crate::collector::{AttributeCollector, Attributes};
use crate::config::FactoryConfig;
use crate::error::FactoryResult;
use crate::key::TypeHandle;
use crate::registry::{
    construct_many, construct_with, instantiate, target_handle, FactoryRegistry, FactoryTable,
};
use crate::request::BuildRequest;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static FACTORY_REGISTRY: Lazy<RwLock<FactoryRegistry>> =
    Lazy::new(|| RwLock::new(FactoryRegistry::new()));

/// Get a read guard for the global factory registry.
///
/// A poisoned lock is recovered.
pub fn factory_registry() -> RwLockReadGuard<'static, FactoryRegistry> {
    FACTORY_REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

/// Get a write guard for the global factory registry.
pub fn factory_registry_mut() -> RwLockWriteGuard<'static, FactoryRegistry> {
    FACTORY_REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Register defaults for `T` in the global registry
pub fn register<T, F>(defaults: F)
where
    T: Any,
    F: FnOnce(&mut AttributeCollector),
{
    // Capture before taking the lock so a block may read the registry
    let collector = AttributeCollector::capture(defaults);
    factory_registry_mut().insert(TypeHandle::of::<T>(), collector);
}

/// Register defaults for a runtime target in the global registry
///
/// The target is checked before `defaults` runs.
pub fn register_dyn<F>(target: &dyn Any, defaults: F) -> FactoryResult<()>
where
    F: FnOnce(&mut AttributeCollector),
{
    let type_handle = target_handle(target)?;
    let collector = AttributeCollector::capture(defaults);
    factory_registry_mut().insert(type_handle, collector);
    Ok(())
}

/// Resolve `request` against the global registry
///
/// The read guard is released before this returns, so constructors and
/// `Deserialize` impls may use the global registry themselves.
fn resolve<T: Any>(request: BuildRequest) -> FactoryResult<Attributes> {
    factory_registry().resolve::<T>(&request)
}

pub fn build<T>(request: impl Into<BuildRequest>) -> FactoryResult<T>
where
    T: DeserializeOwned + Any,
{
    build_with(request, instantiate::<T>)
}

pub fn build_default<T>(overrides: Option<Attributes>) -> FactoryResult<T>
where
    T: DeserializeOwned + Any,
{
    build(BuildRequest::new().overrides(overrides.unwrap_or_default()))
}

pub fn build_named<T>(name: &str, overrides: Option<Attributes>) -> FactoryResult<T>
where
    T: DeserializeOwned + Any,
{
    build(BuildRequest::named(name).overrides(overrides.unwrap_or_default()))
}

/// Build `T` from the global registry with an explicit constructor
///
/// Lookup errors pass through as-is; only `construct` failures are wrapped
/// into [`FactoryError::CannotInstantiate`](crate::FactoryError::CannotInstantiate).
pub fn build_with<T, F, E>(request: impl Into<BuildRequest>, construct: F) -> FactoryResult<T>
where
    T: Any,
    F: FnOnce(Attributes) -> Result<T, E>,
    E: fmt::Display,
{
    let attributes = resolve::<T>(request.into())?;
    construct_with(attributes, construct)
}

pub fn build_many<T>(count: usize, request: impl Into<BuildRequest>) -> FactoryResult<Vec<T>>
where
    T: DeserializeOwned + Any,
{
    let attributes = resolve::<T>(request.into())?;
    construct_many(count, attributes)
}

/// Snapshot of every factory table in the global registry
pub fn registered() -> HashMap<TypeHandle, FactoryTable> {
    factory_registry().registered().clone()
}

pub fn is_registered<T: Any>() -> bool {
    factory_registry().is_registered::<T>()
}

/// Remove every factory from the global registry
pub fn reset() {
    factory_registry_mut().clear();
}

/// Replace the global registry's configuration
pub fn configure(config: FactoryConfig) {
    factory_registry_mut().set_config(config);
}
