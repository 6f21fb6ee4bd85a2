//! Cross-file validation rules and signature introspection.
//!
//! A rule is a plain function whose parameters are references to
//! configuration models, e.g.
//! `fn(&FeatureConfig, &SubFeatureConfig) -> Vec<CrossConfigError>`. The
//! parameter types, in declared order, become the rule's required types; at
//! run time the runner looks each one up and passes the instances back in the
//! same order.

use crossconf_rs_protocol::{ConfigInstance, ConfigMap, ConfigModel, ConfigType, CrossConfigError};
use std::fmt;
use std::sync::Arc;

/// Erased rule body. Returns `None` when an argument has the wrong type.
type RuleFn = dyn Fn(&[&ConfigInstance]) -> Option<Vec<CrossConfigError>> + Send + Sync;

/// A named rule together with the ordered configuration types it consumes.
#[derive(Clone)]
pub struct ValidationRule {
    name: String,
    required: Vec<ConfigType>,
    func: Arc<RuleFn>,
}

impl ValidationRule {
    /// Build a rule from a typed function, deriving its required types from
    /// the parameter list.
    pub fn new<Args, F>(name: impl Into<String>, rule: F) -> Self
    where
        F: IntoValidationRule<Args>,
    {
        rule.into_rule(name.into())
    }

    /// Build a rule over erased instances with an explicit type list.
    ///
    /// The instances are passed in the order of `required`.
    pub fn dynamic<F>(name: impl Into<String>, required: Vec<ConfigType>, rule: F) -> Self
    where
        F: Fn(&[&ConfigInstance]) -> Vec<CrossConfigError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            required,
            func: Arc::new(move |args: &[&ConfigInstance]| Some(rule(args))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required types in parameter order.
    pub fn required_types(&self) -> &[ConfigType] {
        &self.required
    }

    /// Whether the rule consumes `config_type`.
    pub fn requires(&self, config_type: &ConfigType) -> bool {
        self.required.contains(config_type)
    }

    /// Required types absent from `configs`.
    pub fn missing_types(&self, configs: &ConfigMap) -> Vec<ConfigType> {
        self.required
            .iter()
            .filter(|config_type| !configs.contains(config_type))
            .copied()
            .collect()
    }

    /// Invoke the rule with instances in required-type order.
    pub(crate) fn invoke(&self, args: &[&ConfigInstance]) -> Option<Vec<CrossConfigError>> {
        if args.len() != self.required.len() {
            return None;
        }
        (self.func)(args)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish()
    }
}

/// Conversion from a typed rule function into a `ValidationRule`.
///
/// Implemented for `Fn(&A, ...) -> Vec<CrossConfigError>` with one to six
/// configuration model parameters. `Args` is the parameter tuple and only
/// serves to keep the implementations apart.
pub trait IntoValidationRule<Args>: Send + Sync + 'static {
    fn into_rule(self, name: String) -> ValidationRule;
}

macro_rules! impl_into_validation_rule {
    ($($ty:ident => $idx:tt),+) => {
        impl<F, $($ty),+> IntoValidationRule<($($ty,)+)> for F
        where
            F: Fn($(&$ty),+) -> Vec<CrossConfigError> + Send + Sync + 'static,
            $($ty: ConfigModel,)+
        {
            fn into_rule(self, name: String) -> ValidationRule {
                let rule_fn = self;
                let func = move |args: &[&ConfigInstance]| -> Option<Vec<CrossConfigError>> {
                    Some(rule_fn($(args.get($idx)?.downcast_ref::<$ty>()?),+))
                };
                ValidationRule {
                    name,
                    required: vec![$(ConfigType::of::<$ty>()),+],
                    func: Arc::new(func),
                }
            }
        }
    };
}

impl_into_validation_rule!(A => 0);
impl_into_validation_rule!(A => 0, B => 1);
impl_into_validation_rule!(A => 0, B => 1, C => 2);
impl_into_validation_rule!(A => 0, B => 1, C => 2, D => 3);
impl_into_validation_rule!(A => 0, B => 1, C => 2, D => 3, E => 4);
impl_into_validation_rule!(A => 0, B => 1, C => 2, D => 3, E => 4, G => 5);
