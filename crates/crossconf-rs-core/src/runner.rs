//! Cross-file validation runner.

use crate::registry::ValidationRegistry;
use crate::rule::ValidationRule;
use crossconf_rs_protocol::{AggregateError, ConfigMap, ConfigType, CrossConfigError, ErrorPolicy};
use log::{debug, info, warn};

/// A rule that was not executed because some of its inputs were not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub rule: String,
    pub missing: Vec<ConfigType>,
}

/// What a run did: reported errors, executed rules and skipped rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub errors: Vec<CrossConfigError>,
    pub executed: Vec<String>,
    pub skipped: Vec<SkippedRule>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Executes registered rules against a loaded config map.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRunner<'a> {
    registry: &'a ValidationRegistry,
}

impl<'a> ValidationRunner<'a> {
    pub fn new(registry: &'a ValidationRegistry) -> Self {
        Self { registry }
    }

    /// Run every applicable rule and return the reported errors.
    ///
    /// See [`ValidationRunner::run_with_report`].
    pub fn run(
        &self,
        configs: &ConfigMap,
        policy: ErrorPolicy,
    ) -> Result<Vec<CrossConfigError>, AggregateError> {
        self.run_with_report(configs, policy).map(|report| report.errors)
    }

    /// Run every applicable rule in registration order.
    ///
    /// A rule runs only when all of its required types are present in
    /// `configs`; otherwise it is skipped without reporting anything. With
    /// `ErrorPolicy::FailFast` the run stops at the first rule that reports
    /// errors and those errors are returned as an `AggregateError`.
    pub fn run_with_report(
        &self,
        configs: &ConfigMap,
        policy: ErrorPolicy,
    ) -> Result<RunReport, AggregateError> {
        info!(
            "running cross-file validation (rules={}, configs={}, policy={:?})",
            self.registry.len(),
            configs.len(),
            policy
        );
        let mut report = RunReport::default();

        for rule in self.registry.rules() {
            let Some(errors) = run_rule(rule, configs, &mut report) else {
                continue;
            };
            if errors.is_empty() {
                continue;
            }
            warn!(
                "validation rule reported errors (rule={}, errors={})",
                rule.name(),
                errors.len()
            );
            if policy.is_fail_fast() {
                debug!("fail-fast: stopping rule execution");
                return Err(AggregateError::new(
                    errors.into_iter().map(Into::into).collect(),
                ));
            }
            report.errors.extend(errors);
        }

        info!(
            "cross-file validation finished (executed={}, skipped={}, errors={})",
            report.executed.len(),
            report.skipped.len(),
            report.errors.len()
        );
        Ok(report)
    }
}

/// Invoke `rule` if all of its inputs are loaded, recording the outcome.
fn run_rule(
    rule: &ValidationRule,
    configs: &ConfigMap,
    report: &mut RunReport,
) -> Option<Vec<CrossConfigError>> {
    let args = rule
        .required_types()
        .iter()
        .map(|config_type| configs.instance(config_type))
        .collect::<Option<Vec<_>>>();
    let Some(args) = args else {
        let missing = rule.missing_types(configs);
        debug!(
            "skipping validation rule (rule={}, missing={:?})",
            rule.name(),
            missing
        );
        report.skipped.push(SkippedRule {
            rule: rule.name().to_string(),
            missing,
        });
        return None;
    };

    debug!("executing validation rule (rule={})", rule.name());
    let Some(errors) = rule.invoke(&args) else {
        warn!(
            "validation rule arguments did not match its signature (rule={})",
            rule.name()
        );
        report.skipped.push(SkippedRule {
            rule: rule.name().to_string(),
            missing: Vec::new(),
        });
        return None;
    };
    report.executed.push(rule.name().to_string());

    Some(
        errors
            .into_iter()
            .map(|err| implicate_required(err, rule))
            .collect(),
    )
}

/// Default the implicated types to the rule's inputs.
fn implicate_required(err: CrossConfigError, rule: &ValidationRule) -> CrossConfigError {
    if !err.config_types.is_empty() {
        return err;
    }
    rule.required_types()
        .iter()
        .fold(err, |err, config_type| err.with_type(*config_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossconf_rs_protocol::{ConfigInstance, ValidationError};
    use crossconf_rs_test_utils::{Alpha, Beta, Gamma, GammaEntry};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn alpha(count: u32) -> ConfigInstance {
        ConfigInstance::new(Alpha {
            name: "primary".to_string(),
            count,
        })
    }

    fn beta(enabled: bool) -> ConfigInstance {
        ConfigInstance::new(Beta { enabled })
    }

    fn gamma(labels: &[&str]) -> ConfigInstance {
        ConfigInstance::new(Gamma {
            entries: labels
                .iter()
                .map(|label| GammaEntry {
                    label: label.to_string(),
                })
                .collect(),
        })
    }

    /// Flags an enabled `Beta` paired with an `Alpha` without capacity.
    fn capacity_rule(alpha: &Alpha, beta: &Beta) -> Vec<CrossConfigError> {
        if beta.enabled && alpha.count == 0 {
            vec![
                CrossConfigError::new("enabled without capacity")
                    .with_detail("name", &alpha.name),
            ]
        } else {
            Vec::new()
        }
    }

    /// One error per label longer than the alpha count.
    fn label_rule(alpha: &Alpha, gamma: &Gamma) -> Vec<CrossConfigError> {
        gamma
            .entries
            .iter()
            .filter(|entry| entry.label.len() > alpha.count as usize)
            .map(|entry| {
                CrossConfigError::new("label too long")
                    .with_type(ConfigType::of::<Gamma>())
                    .with_detail("label", &entry.label)
            })
            .collect()
    }

    #[test]
    fn rule_never_runs_with_only_one_input() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = ValidationRegistry::new();
        registry
            .register("counting", move |_: &Alpha, _: &Beta| {
                counter.fetch_add(1, Ordering::SeqCst);
                Vec::new()
            })
            .expect("register");

        let configs: ConfigMap = [alpha(1)].into_iter().collect();
        let report = ValidationRunner::new(&registry)
            .run_with_report(&configs, ErrorPolicy::Accumulate)
            .expect("run");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(report.errors.is_empty());
        assert!(report.executed.is_empty());
        assert_eq!(
            report.skipped,
            vec![SkippedRule {
                rule: "counting".to_string(),
                missing: vec![ConfigType::of::<Beta>()],
            }]
        );
    }

    #[test]
    fn rule_runs_once_with_arguments_in_declared_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut registry = ValidationRegistry::new();
        registry
            .register("ordered", move |beta: &Beta, alpha: &Alpha| {
                counter.fetch_add(1, Ordering::SeqCst);
                vec![CrossConfigError::new(format!("{} {}", beta.enabled, alpha.count))]
            })
            .expect("register");

        let configs: ConfigMap = [alpha(7), beta(true)].into_iter().collect();
        let errors = ValidationRunner::new(&registry)
            .run(&configs, ErrorPolicy::Accumulate)
            .expect("run");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            errors,
            vec![
                CrossConfigError::new("true 7")
                    .with_type(ConfigType::of::<Beta>())
                    .with_type(ConfigType::of::<Alpha>())
            ]
        );
    }

    #[test]
    fn accumulate_concatenates_in_registration_order() {
        let mut registry = ValidationRegistry::new();
        registry.register("labels", label_rule).expect("register");
        registry.register("capacity", capacity_rule).expect("register");

        let configs: ConfigMap = [alpha(0), beta(true), gamma(&["a", ""])]
            .into_iter()
            .collect();
        let report = ValidationRunner::new(&registry)
            .run_with_report(&configs, ErrorPolicy::Accumulate)
            .expect("run");

        let messages = report
            .errors
            .iter()
            .map(|err| err.message.as_str())
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["label too long", "enabled without capacity"]);
        assert_eq!(report.executed, vec!["labels", "capacity"]);
        assert_eq!(report.errors[0].config_types, vec![ConfigType::of::<Gamma>()]);
        assert_eq!(
            report.errors[1].config_types,
            vec![ConfigType::of::<Alpha>(), ConfigType::of::<Beta>()]
        );
    }

    #[test]
    fn fail_fast_returns_every_error_of_the_first_failing_rule() {
        let mut registry = ValidationRegistry::new();
        registry.register("capacity", capacity_rule).expect("register");
        registry.register("labels", label_rule).expect("register");

        let configs: ConfigMap = [alpha(1), beta(true), gamma(&["long", "longer", "x"])]
            .into_iter()
            .collect();
        let err = ValidationRunner::new(&registry)
            .run(&configs, ErrorPolicy::FailFast)
            .unwrap_err();

        assert_eq!(err.len(), 2);
        assert!(err.errors.iter().all(|err| matches!(
            err,
            ValidationError::CrossConfig(err) if err.message == "label too long"
        )));
    }

    #[test]
    fn fail_fast_passes_when_no_rule_reports() {
        let mut registry = ValidationRegistry::new();
        registry.register("capacity", capacity_rule).expect("register");

        let configs: ConfigMap = [alpha(3), beta(true)].into_iter().collect();
        let errors = ValidationRunner::new(&registry)
            .run(&configs, ErrorPolicy::FailFast)
            .expect("run");
        assert!(errors.is_empty());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut registry = ValidationRegistry::new();
        registry.register("labels", label_rule).expect("register");
        registry.register("capacity", capacity_rule).expect("register");

        let configs: ConfigMap = [alpha(0), beta(true), gamma(&["b", "a"])]
            .into_iter()
            .collect();
        let runner = ValidationRunner::new(&registry);
        let first = runner
            .run_with_report(&configs, ErrorPolicy::Accumulate)
            .expect("run");
        let second = runner
            .run_with_report(&configs, ErrorPolicy::Accumulate)
            .expect("run");
        assert_eq!(first, second);
        assert_eq!(first.errors.len(), 3);
    }

    #[test]
    fn empty_registry_reports_nothing() {
        let registry = ValidationRegistry::new();
        let configs: ConfigMap = [alpha(0)].into_iter().collect();
        let report = ValidationRunner::new(&registry)
            .run_with_report(&configs, ErrorPolicy::FailFast)
            .expect("run");
        assert_eq!(report, RunReport::default());
    }
}
