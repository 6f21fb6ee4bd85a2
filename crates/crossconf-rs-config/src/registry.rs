//! Registry mapping source keys (filenames) to configuration types.

use crossconf_rs_protocol::{ConfigModel, ConfigType, RegistryError, SourceKey};
use log::debug;
use std::collections::BTreeMap;

/// Filename to configuration type registry.
///
/// Populated during initialization and only borrowed immutably by loaders.
/// Source keys and types are one-to-one: re-registering the same pair is a
/// no-op, any other collision is rejected.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    /// Map of source key to configuration type.
    types: BTreeMap<SourceKey, ConfigType>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the model type `T` under a source key.
    pub fn register<T: ConfigModel>(
        &mut self,
        source_key: impl Into<SourceKey>,
    ) -> Result<(), RegistryError> {
        self.register_type(source_key, ConfigType::of::<T>())
    }

    /// Register an already-built type descriptor under a source key.
    pub fn register_type(
        &mut self,
        source_key: impl Into<SourceKey>,
        config_type: ConfigType,
    ) -> Result<(), RegistryError> {
        let source_key = source_key.into();
        if let Some(existing) = self.types.get(&source_key) {
            if *existing == config_type {
                debug!(
                    "config type already registered (source_key={}, config_type={})",
                    source_key, config_type
                );
                return Ok(());
            }
            return Err(RegistryError::DuplicateSourceKey {
                source_key,
                existing: *existing,
                attempted: config_type,
            });
        }
        if let Some(existing_key) = self.source_key_for(&config_type) {
            return Err(RegistryError::DuplicateConfigType {
                config_type,
                existing_key: existing_key.to_string(),
                source_key,
            });
        }

        debug!(
            "registering config type (source_key={}, config_type={})",
            source_key, config_type
        );
        self.types.insert(source_key, config_type);
        Ok(())
    }

    /// Resolve a source key to its registered type.
    pub fn resolve(&self, source_key: &str) -> Option<ConfigType> {
        self.types.get(source_key).copied()
    }

    /// Find the source key a type is registered under.
    pub fn source_key_for(&self, config_type: &ConfigType) -> Option<&str> {
        self.types
            .iter()
            .find(|(_, registered)| *registered == config_type)
            .map(|(source_key, _)| source_key.as_str())
    }

    /// Registered source keys in sorted order.
    pub fn source_keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
