//! Shared types for crossconf: configuration type descriptors, validated
//! instances, and the validation error taxonomy.
//!
//! The loader (`crossconf-rs-config`) and the cross-file runner
//! (`crossconf-rs-core`) both speak in terms of these types.

mod error;
mod model;

pub use error::{
    AggregateError, CrossConfigError, InfrastructureKind, LoaderInfrastructureError,
    RegistryError, SingleConfigError, ValidationError,
};
pub use model::{
    ConfigInstance, ConfigMap, ConfigModel, ConfigType, FieldViolation, ROOT_FIELD_PATH,
};

use serde::{Deserialize, Serialize};

/// Identifier matching a raw input (a filename) to its configuration type.
pub type SourceKey = String;

/// Error propagation policy for loads and cross-file runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first failing source or rule and return the errors seen so far.
    FailFast,
    /// Collect every error and always return normally.
    #[default]
    Accumulate,
}

impl ErrorPolicy {
    /// Whether this policy stops at the first failure.
    pub fn is_fail_fast(self) -> bool {
        matches!(self, ErrorPolicy::FailFast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_policy_defaults_to_accumulate() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Accumulate);
        assert!(ErrorPolicy::FailFast.is_fail_fast());
        assert!(!ErrorPolicy::Accumulate.is_fail_fast());
    }

    #[test]
    fn error_policy_uses_snake_case_names() {
        let encoded = serde_json::to_value(ErrorPolicy::FailFast).expect("serialize");
        assert_eq!(encoded, serde_json::json!("fail_fast"));
        let decoded: ErrorPolicy =
            serde_json::from_value(serde_json::json!("accumulate")).expect("deserialize");
        assert_eq!(decoded, ErrorPolicy::Accumulate);
    }
}
