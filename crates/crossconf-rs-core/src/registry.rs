//! Registry for cross-file validation rules.

use crate::rule::{IntoValidationRule, ValidationRule};
use crossconf_rs_protocol::{ConfigType, RegistryError};
use log::debug;

/// Ordered list of validation rules.
///
/// Registration order is execution order. Rules are added during
/// initialization through `&mut self` and the registry is only borrowed
/// immutably while a run is in progress.
#[derive(Debug, Default, Clone)]
pub struct ValidationRegistry {
    rules: Vec<ValidationRule>,
}

impl ValidationRegistry {
    /// Create an empty rule registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed rule function.
    ///
    /// The rule's required types are its parameter types, in order.
    pub fn register<Args, F>(
        &mut self,
        name: impl Into<String>,
        rule: F,
    ) -> Result<(), RegistryError>
    where
        F: IntoValidationRule<Args>,
    {
        self.register_rule(ValidationRule::new(name, rule))
    }

    /// Register a pre-built rule.
    pub fn register_rule(&mut self, rule: ValidationRule) -> Result<(), RegistryError> {
        if rule.required_types().is_empty() {
            return Err(RegistryError::InvalidRuleSignature {
                rule: rule.name().to_string(),
                reason: "rule must take at least one config".to_string(),
            });
        }
        if let Some(duplicate) = repeated_type(rule.required_types()) {
            return Err(RegistryError::InvalidRuleSignature {
                rule: rule.name().to_string(),
                reason: format!("config {duplicate} is requested more than once"),
            });
        }
        if self.get(rule.name()).is_some() {
            return Err(RegistryError::DuplicateRule(rule.name().to_string()));
        }
        debug!(
            "registering validation rule (name={}, requires={:?})",
            rule.name(),
            rule.required_types()
        );
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in registration order.
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Fetch a rule by name.
    pub fn get(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// Rules that consume `config_type`, in registration order.
    pub fn rules_for(&self, config_type: &ConfigType) -> Vec<&ValidationRule> {
        self.rules
            .iter()
            .filter(|rule| rule.requires(config_type))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn repeated_type(types: &[ConfigType]) -> Option<ConfigType> {
    types
        .iter()
        .enumerate()
        .find(|(idx, config_type)| types[..*idx].contains(config_type))
        .map(|(_, config_type)| *config_type)
}
