//! Bundled configuration models and cross-file rules.
//!
//! `default_pipeline` wires both into a ready-to-use `ConfigPipeline`.

pub mod models;
pub mod validators;

pub use models::{
    DatabaseConfig, FeatureConfig, MyNewThingConfig, SingleFeatureConfig, SingleSubFeatureConfig,
    SomeNewConfig, SubFeatureConfig, register_models,
};
pub use validators::{
    feature_references_defined_subfeatures, register_rules, special_feature_requires_minimum,
};

use crossconf_rs_config::SchemaRegistry;
use crossconf_rs_core::{ConfigPipeline, ValidationRegistry};
use crossconf_rs_protocol::RegistryError;

/// Pipeline with every bundled model and rule registered.
pub fn default_pipeline() -> Result<ConfigPipeline, RegistryError> {
    let mut schemas = SchemaRegistry::new();
    register_models(&mut schemas)?;
    let mut rules = ValidationRegistry::new();
    register_rules(&mut rules)?;
    Ok(ConfigPipeline::builder()
        .schema_registry(schemas)
        .validation_registry(rules)
        .build())
}
