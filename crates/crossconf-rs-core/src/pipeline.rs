//! Load-then-validate pipeline over a config directory.

use crate::registry::ValidationRegistry;
use crate::runner::{RunReport, ValidationRunner};
use crossconf_rs_config::{
    ConfigLoader, LoadOutcome, LoaderOptions, SchemaRegistry, SchemaValidator, StructuralValidator,
};
use crossconf_rs_protocol::{
    AggregateError, ConfigMap, CrossConfigError, ErrorPolicy, ValidationError,
};
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Schema registry, rule registry and loader settings bundled together.
///
/// Built once during initialization; `check` only borrows it.
#[derive(Clone)]
pub struct ConfigPipeline {
    schemas: SchemaRegistry,
    rules: ValidationRegistry,
    validator: Arc<dyn StructuralValidator>,
    options: LoaderOptions,
}

impl ConfigPipeline {
    /// Start building a pipeline with empty registries.
    pub fn builder() -> ConfigPipelineBuilder {
        ConfigPipelineBuilder::new()
    }

    pub fn schema_registry(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn validation_registry(&self) -> &ValidationRegistry {
        &self.rules
    }

    pub fn loader_options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load `directory` and run cross-file rules over whatever loaded.
    ///
    /// With `ErrorPolicy::FailFast` the first failing source or rule ends the
    /// check with an `AggregateError`. With `ErrorPolicy::Accumulate` both
    /// stages always run and every error is returned in the report.
    pub fn check(
        &self,
        directory: impl AsRef<Path>,
        policy: ErrorPolicy,
    ) -> Result<PipelineReport, AggregateError> {
        let outcome = ConfigLoader::new(&self.schemas)
            .with_validator(self.validator.as_ref())
            .with_options(self.options.clone())
            .load(directory, policy)?;
        let run = ValidationRunner::new(&self.rules).run_with_report(outcome.configs(), policy)?;
        let report = PipelineReport { outcome, run };
        info!(
            "config check finished (single_config_errors={}, cross_config_errors={})",
            report.single_config_errors().len(),
            report.cross_config_errors().len()
        );
        Ok(report)
    }
}

/// Builder for assembling a `ConfigPipeline` in code.
#[derive(Clone, Default)]
pub struct ConfigPipelineBuilder {
    schemas: SchemaRegistry,
    rules: ValidationRegistry,
    validator: Option<Arc<dyn StructuralValidator>>,
    options: LoaderOptions,
}

impl ConfigPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the schema registry.
    pub fn schema_registry(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    /// Replace the validation rule registry.
    pub fn validation_registry(mut self, rules: ValidationRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Use a structural validator other than the JSON Schema one.
    pub fn validator(mut self, validator: Arc<dyn StructuralValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Replace the loader options.
    pub fn loader_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ConfigPipeline {
        ConfigPipeline {
            schemas: self.schemas,
            rules: self.rules,
            validator: self.validator.unwrap_or_else(|| Arc::new(SchemaValidator)),
            options: self.options,
        }
    }
}

/// Everything a pipeline check produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    outcome: LoadOutcome,
    run: RunReport,
}

impl PipelineReport {
    /// Instances that passed structural validation.
    pub fn configs(&self) -> &ConfigMap {
        self.outcome.configs()
    }

    /// Load-phase errors (single-file and infrastructure).
    pub fn single_config_errors(&self) -> &[ValidationError] {
        self.outcome.errors()
    }

    pub fn cross_config_errors(&self) -> &[CrossConfigError] {
        &self.run.errors
    }

    /// Load errors followed by cross-file errors.
    pub fn all_errors(&self) -> Vec<ValidationError> {
        self.outcome
            .errors()
            .iter()
            .cloned()
            .chain(self.run.errors.iter().cloned().map(ValidationError::from))
            .collect()
    }

    pub fn run(&self) -> &RunReport {
        &self.run
    }

    pub fn is_clean(&self) -> bool {
        !self.outcome.has_errors() && self.run.is_clean()
    }
}
