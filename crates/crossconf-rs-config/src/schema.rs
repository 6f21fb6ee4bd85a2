//! Structural validation of raw config data against a configuration type.

use crossconf_rs_protocol::{ConfigInstance, ConfigType, FieldViolation, ROOT_FIELD_PATH};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, ValidationError};
use log::debug;
use serde_json::Value;

/// Turns parsed data into a typed instance or a list of field violations.
pub trait StructuralValidator: Send + Sync {
    /// Validate `value` as `config_type`.
    ///
    /// Every field-level problem is reported; implementations must not
    /// collapse them into one.
    fn validate(
        &self,
        value: Value,
        config_type: ConfigType,
    ) -> Result<ConfigInstance, Vec<FieldViolation>>;
}

/// Validates against the model's generated JSON Schema, then decodes it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaValidator;

impl StructuralValidator for SchemaValidator {
    fn validate(
        &self,
        value: Value,
        config_type: ConfigType,
    ) -> Result<ConfigInstance, Vec<FieldViolation>> {
        let schema = config_type.json_schema();
        let validator = match jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
        {
            Ok(validator) => validator,
            Err(err) => {
                return Err(vec![FieldViolation::new(
                    ROOT_FIELD_PATH,
                    format!("schema for {config_type} could not be compiled: {err}"),
                )]);
            }
        };

        let violations: Vec<FieldViolation> = validator
            .iter_errors(&value)
            .map(|err| violation_from_error(&err))
            .collect();
        if !violations.is_empty() {
            debug!(
                "schema validation failed (config_type={}, violations={})",
                config_type,
                violations.len()
            );
            return Err(violations);
        }

        config_type.decode(value)
    }
}

/// Map a JSON Schema error onto a dotted field path.
fn violation_from_error(err: &ValidationError<'_>) -> FieldViolation {
    let mut path = pointer_to_field_path(&err.instance_path.to_string());
    // Missing properties are reported against their parent object.
    if let ValidationErrorKind::Required { property } = &err.kind {
        if let Some(name) = property.as_str() {
            path = join_path(&path, name);
        }
    }
    FieldViolation::new(path, err.to_string())
}

/// Convert a JSON pointer (`/features/0/name`) to `features[0].name`.
fn pointer_to_field_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            path.push('[');
            path.push_str(&segment);
            path.push(']');
        } else {
            path = join_path(&path, &segment);
        }
    }
    path
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
