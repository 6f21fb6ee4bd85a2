//! Directory loader for registered configuration sources.
//!
//! Enumerates candidate files in a directory, resolves each filename through
//! the schema registry, parses it, runs structural validation and collects
//! either a typed instance or the errors for that source.

mod source_io;
mod utils;


use crate::registry::SchemaRegistry;
use crate::schema::{SchemaValidator, StructuralValidator};
use crossconf_rs_protocol::{
    AggregateError, ConfigInstance, ConfigMap, ConfigType, ErrorPolicy, FieldViolation,
    ROOT_FIELD_PATH, SingleConfigError, ValidationError,
};
use log::{debug, info, warn};
use std::path::Path;

/// Filename patterns enumerated by default.
const DEFAULT_SOURCE_PATTERNS: &[&str] = &["*.json", "*.json5"];

/// Options controlling source discovery.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Glob patterns matched against filenames in the config directory.
    pub patterns: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_SOURCE_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
        }
    }
}

impl LoaderOptions {
    /// Create options with the default `*.json` / `*.json5` patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filename patterns.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of loading a directory.
///
/// Holds one instance per successfully validated source and, in enumeration
/// order, every error recorded for the sources that failed.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    configs: ConfigMap,
    errors: Vec<ValidationError>,
}

impl LoadOutcome {
    /// Loaded instances keyed by configuration type.
    pub fn configs(&self) -> &ConfigMap {
        &self.configs
    }

    /// Single-file and infrastructure errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Split into the config mapping and the error list.
    pub fn into_parts(self) -> (ConfigMap, Vec<ValidationError>) {
        (self.configs, self.errors)
    }
}

/// Loads registered sources from a directory.
#[derive(Clone)]
pub struct ConfigLoader<'a> {
    registry: &'a SchemaRegistry,
    validator: &'a dyn StructuralValidator,
    options: LoaderOptions,
}

impl<'a> ConfigLoader<'a> {
    /// Create a loader using the JSON Schema validator and default options.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            validator: &SchemaValidator,
            options: LoaderOptions::default(),
        }
    }

    /// Use a different structural validator.
    pub fn with_validator(mut self, validator: &'a dyn StructuralValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the discovery options.
    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Load every registered source in `directory`.
    ///
    /// Unregistered files are ignored. With `ErrorPolicy::FailFast` loading
    /// stops at the first source that records an error and the errors for
    /// that source are returned as an `AggregateError`; the partial mapping is
    /// discarded. With `ErrorPolicy::Accumulate` this always returns `Ok`.
    pub fn load(
        &self,
        directory: impl AsRef<Path>,
        policy: ErrorPolicy,
    ) -> Result<LoadOutcome, AggregateError> {
        let directory = directory.as_ref();
        info!(
            "loading configs (dir={}, policy={:?}, registered={})",
            directory.display(),
            policy,
            self.registry.len()
        );
        let mut outcome = LoadOutcome::default();

        let sources = utils::build_matcher(&self.options.patterns, directory)
            .and_then(|matcher| utils::list_sources(directory, &matcher));
        let sources = match sources {
            Ok(sources) => sources,
            Err(err) => {
                warn!("config directory unavailable: {}", err.message);
                outcome.errors.push(err.into());
                return finish(outcome, policy);
            }
        };

        for path in sources {
            let Some(source_key) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(config_type) = self.registry.resolve(source_key) else {
                debug!("skipping unregistered source (source_key={})", source_key);
                continue;
            };

            match self.load_source(&path, source_key, config_type) {
                Ok(instance) => {
                    debug!(
                        "loaded config (source_key={}, config_type={})",
                        source_key, config_type
                    );
                    outcome.configs.insert(instance);
                }
                Err(errors) => {
                    warn!(
                        "config source failed (source_key={}, errors={})",
                        source_key,
                        errors.len()
                    );
                    outcome.errors.extend(errors);
                    if policy.is_fail_fast() {
                        debug!("fail-fast: stopping source enumeration");
                        break;
                    }
                }
            }
        }

        info!(
            "configs loaded (loaded={}, errors={})",
            outcome.configs.len(),
            outcome.errors.len()
        );
        finish(outcome, policy)
    }

    /// Read, parse and validate a single source.
    fn load_source(
        &self,
        path: &Path,
        source_key: &str,
        config_type: ConfigType,
    ) -> Result<ConfigInstance, Vec<ValidationError>> {
        let value = source_io::read_source(path, source_key).map_err(|err| vec![err.into()])?;
        self.validator
            .validate(value, config_type)
            .map_err(|violations| single_config_errors(source_key, violations))
    }
}

fn single_config_errors(source_key: &str, violations: Vec<FieldViolation>) -> Vec<ValidationError> {
    if violations.is_empty() {
        return vec![
            SingleConfigError::new(source_key, ROOT_FIELD_PATH, "structural validation failed")
                .into(),
        ];
    }
    violations
        .into_iter()
        .map(|violation| {
            SingleConfigError::new(source_key, violation.path, violation.message).into()
        })
        .collect()
}

fn finish(outcome: LoadOutcome, policy: ErrorPolicy) -> Result<LoadOutcome, AggregateError> {
    if policy.is_fail_fast() && outcome.has_errors() {
        return Err(AggregateError::new(outcome.errors));
    }
    Ok(outcome)
}
