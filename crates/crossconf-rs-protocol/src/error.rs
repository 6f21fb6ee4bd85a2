//! Validation error taxonomy and registration errors.

use crate::ConfigType;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Separator placed between errors when an aggregate is rendered.
const AGGREGATE_SEPARATOR_WIDTH: usize = 80;

/// Any error reported by a load or a cross-file run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field-level problem in a single source.
    #[error(transparent)]
    SingleConfig(#[from] SingleConfigError),
    /// A problem reported by a cross-file rule.
    #[error(transparent)]
    CrossConfig(#[from] CrossConfigError),
    /// A source could not be read or parsed at all.
    #[error(transparent)]
    LoaderInfrastructure(#[from] LoaderInfrastructureError),
}

impl ValidationError {
    /// Source the error is attributed to, when it came from the load phase.
    pub fn source_key(&self) -> Option<&str> {
        match self {
            ValidationError::SingleConfig(err) => Some(&err.source_key),
            ValidationError::LoaderInfrastructure(err) => Some(&err.source_key),
            ValidationError::CrossConfig(_) => None,
        }
    }

    /// Short label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::SingleConfig(_) => "single_config",
            ValidationError::CrossConfig(_) => "cross_config",
            ValidationError::LoaderInfrastructure(_) => "loader_infrastructure",
        }
    }
}

/// A field-level structural problem in one source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ERROR: {message}\nsource_key={source_key}\nfield_path={field_path}")]
pub struct SingleConfigError {
    /// Source (filename) the problem was found in.
    pub source_key: String,
    /// Dotted path to the offending field.
    pub field_path: String,
    /// Human-readable description.
    pub message: String,
}

impl SingleConfigError {
    pub fn new(
        source_key: impl Into<String>,
        field_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

/// A consistency problem found across several loaded configs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossConfigError {
    /// Human-readable description.
    pub message: String,
    /// Configuration types implicated in the problem.
    pub config_types: Vec<ConfigType>,
    /// Extra key/value context (e.g. the offending name).
    pub details: BTreeMap<String, String>,
}

impl CrossConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            config_types: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    /// Mark a configuration type as implicated.
    pub fn with_type(mut self, config_type: ConfigType) -> Self {
        if !self.config_types.contains(&config_type) {
            self.config_types.push(config_type);
        }
        self
    }

    /// Attach a context entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }
}

impl fmt::Display for CrossConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: {}", self.message)?;
        if !self.config_types.is_empty() {
            let names = self
                .config_types
                .iter()
                .map(|config_type| config_type.name())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "\nconfig_types=[{names}]")?;
        }
        for (key, value) in &self.details {
            write!(f, "\n{key}={value}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CrossConfigError {}

/// What stopped a source from reaching structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfrastructureKind {
    /// The file or directory could not be read.
    Read,
    /// The contents are not well-formed.
    Parse,
    /// A source file pattern could not be compiled.
    Pattern,
}

impl fmt::Display for InfrastructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InfrastructureKind::Read => "read",
            InfrastructureKind::Parse => "parse",
            InfrastructureKind::Pattern => "pattern",
        };
        f.write_str(label)
    }
}

/// A non-validation failure while loading a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ERROR: {kind} failure: {message}\nsource_key={source_key}")]
pub struct LoaderInfrastructureError {
    /// Source (filename or directory) that failed.
    pub source_key: String,
    pub kind: InfrastructureKind,
    /// Underlying error text.
    pub message: String,
}

impl LoaderInfrastructureError {
    pub fn new(
        source_key: impl Into<String>,
        kind: InfrastructureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_key: source_key.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Errors gathered before a fail-fast load or run stopped.
///
/// Never empty when produced by the loader or runner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(.errors))]
pub struct AggregateError {
    pub errors: Vec<ValidationError>,
}

impl AggregateError {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    let separator = format!("\n{}\n", "#".repeat(AGGREGATE_SEPARATOR_WIDTH));
    errors
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Errors raised while populating the schema or validation registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A different type already claims this source key.
    #[error(
        "source key {source_key} is already registered to {existing}, cannot register {attempted}"
    )]
    DuplicateSourceKey {
        source_key: String,
        existing: ConfigType,
        attempted: ConfigType,
    },
    /// The type is already registered under another source key.
    #[error(
        "config type {config_type} is already registered under {existing_key}, \
         cannot register it under {source_key}"
    )]
    DuplicateConfigType {
        config_type: ConfigType,
        existing_key: String,
        source_key: String,
    },
    /// A rule with the same name is already registered.
    #[error("validation rule {0} is already registered")]
    DuplicateRule(String),
    /// The rule does not declare usable configuration inputs.
    #[error("validation rule {rule} has an invalid signature: {reason}")]
    InvalidRuleSignature { rule: String, reason: String },
}
