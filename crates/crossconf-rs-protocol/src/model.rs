//! Configuration type descriptors and validated instances.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Field path reported for problems with the document as a whole.
pub const ROOT_FIELD_PATH: &str = "root";

/// A configuration schema that can be loaded from a source file.
///
/// Structural checks come from the model's JSON Schema and serde decoding;
/// `check` covers constraints a schema cannot express. Prefer `#[schemars(...)]`
/// validation attributes where possible: schema violations are all reported
/// together, while `check` only runs once the schema has passed.
pub trait ConfigModel: DeserializeOwned + JsonSchema + fmt::Debug + Send + Sync + 'static {
    /// Report field-level constraint violations on a decoded value.
    ///
    /// Only called for data that already satisfies the schema.
    fn check(&self) -> Vec<FieldViolation> {
        Vec::new()
    }
}

/// A single field-level problem found during structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path to the offending field (`features[0].name`).
    pub path: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() {
                ROOT_FIELD_PATH.to_string()
            } else {
                path
            },
            message: message.into(),
        }
    }
}

/// Descriptor for a kind of configuration.
///
/// Identity is the Rust type of the model; the descriptor also carries the
/// hooks the type-erased loader needs to validate and decode raw data.
#[derive(Clone, Copy)]
pub struct ConfigType {
    id: TypeId,
    name: &'static str,
    type_name: &'static str,
    schema: fn() -> Value,
    decode: fn(Value) -> Result<ConfigInstance, Vec<FieldViolation>>,
}

impl ConfigType {
    /// Descriptor for the model type `T`.
    pub fn of<T: ConfigModel>() -> Self {
        let type_name = std::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(type_name),
            type_name,
            schema: schema_of::<T>,
            decode: decode_model::<T>,
        }
    }

    /// Short type name, e.g. `FeatureConfig`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fully qualified Rust type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Whether this descriptor belongs to the model type `T`.
    pub fn is<T: ConfigModel>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// JSON Schema generated from the model definition.
    pub fn json_schema(&self) -> Value {
        (self.schema)()
    }

    /// Decode raw data into an instance and run the model's field checks.
    pub fn decode(&self, value: Value) -> Result<ConfigInstance, Vec<FieldViolation>> {
        (self.decode)(value)
    }
}

impl PartialEq for ConfigType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConfigType {}

impl Hash for ConfigType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn short_type_name(type_name: &'static str) -> &'static str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}

fn schema_of<T: ConfigModel>() -> Value {
    let mut schema = schemars::schema_for!(T).to_value();
    bound_integer_formats(&mut schema);
    schema
}

/// Add the numeric range of sized integer formats (`int64`, `uint32`, ...)
/// so out-of-range values fail the schema at their field instead of decoding.
fn bound_integer_formats(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            let bounds = match map.get("format").and_then(Value::as_str) {
                Some("int32") => Some((Value::from(i32::MIN), Value::from(i32::MAX))),
                Some("int64" | "int") => Some((Value::from(i64::MIN), Value::from(i64::MAX))),
                Some("uint32") => Some((Value::from(0), Value::from(u32::MAX))),
                Some("uint64" | "uint") => Some((Value::from(0), Value::from(u64::MAX))),
                _ => None,
            };
            if let Some((minimum, maximum)) = bounds {
                map.entry("minimum").or_insert(minimum);
                map.entry("maximum").or_insert(maximum);
            }
            map.values_mut().for_each(bound_integer_formats);
        }
        Value::Array(items) => items.iter_mut().for_each(bound_integer_formats),
        _ => {}
    }
}

/// Rewrite floats with no fractional part (`10.0`) as integers.
///
/// JSON Schema treats them as integers, serde does not.
fn normalize_integral_numbers(value: &mut Value) {
    match value {
        Value::Number(number) if number.is_f64() => {
            let Some(float) = number.as_f64() else {
                return;
            };
            if float.fract() != 0.0 {
                return;
            }
            // 2^63 and 2^64 are exact as f64; the casts below cannot saturate.
            if (-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&float) {
                *value = Value::from(float as i64);
            } else if (0.0..18_446_744_073_709_551_616.0).contains(&float) {
                *value = Value::from(float as u64);
            }
        }
        Value::Object(map) => map.values_mut().for_each(normalize_integral_numbers),
        Value::Array(items) => items.iter_mut().for_each(normalize_integral_numbers),
        _ => {}
    }
}

fn decode_model<T: ConfigModel>(mut value: Value) -> Result<ConfigInstance, Vec<FieldViolation>> {
    normalize_integral_numbers(&mut value);
    let model: T = serde_json::from_value(value).map_err(|err| {
        vec![FieldViolation::new(
            ROOT_FIELD_PATH,
            format!("failed to decode: {err}"),
        )]
    })?;
    let violations = model.check();
    if !violations.is_empty() {
        return Err(violations);
    }
    Ok(ConfigInstance::new(model))
}

/// Object-safe view over a stored model value.
trait StoredModel: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> StoredModel for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A validated, immutable configuration value tagged with its type.
#[derive(Clone)]
pub struct ConfigInstance {
    config_type: ConfigType,
    value: Arc<dyn StoredModel>,
}

impl ConfigInstance {
    /// Wrap a model value.
    pub fn new<T: ConfigModel>(model: T) -> Self {
        Self {
            config_type: ConfigType::of::<T>(),
            value: Arc::new(model),
        }
    }

    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Borrow the value as `T` when the instance holds that model type.
    pub fn downcast_ref<T: ConfigModel>(&self) -> Option<&T> {
        // Go through the trait object; `Arc` itself also satisfies the blanket impl.
        StoredModel::as_any(&*self.value).downcast_ref::<T>()
    }
}

impl fmt::Debug for ConfigInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigInstance")
            .field("config_type", &self.config_type)
            .field("value", &self.value)
            .finish()
    }
}

/// Mapping from configuration type to its loaded instance.
///
/// Holds at most one instance per type.
#[derive(Debug, Clone, Default)]
pub struct ConfigMap {
    instances: HashMap<ConfigType, ConfigInstance>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an instance keyed by its type, returning any replaced instance.
    pub fn insert(&mut self, instance: ConfigInstance) -> Option<ConfigInstance> {
        self.instances.insert(instance.config_type(), instance)
    }

    /// Typed lookup.
    pub fn get<T: ConfigModel>(&self) -> Option<&T> {
        self.instances
            .get(&ConfigType::of::<T>())
            .and_then(|instance| instance.downcast_ref::<T>())
    }

    /// Erased lookup by descriptor.
    pub fn instance(&self, config_type: &ConfigType) -> Option<&ConfigInstance> {
        self.instances.get(config_type)
    }

    pub fn contains(&self, config_type: &ConfigType) -> bool {
        self.instances.contains_key(config_type)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Loaded types, sorted by name.
    pub fn config_types(&self) -> Vec<ConfigType> {
        let mut types: Vec<ConfigType> = self.instances.keys().copied().collect();
        types.sort_by_key(|config_type| config_type.name());
        types
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigType, &ConfigInstance)> {
        self.instances.iter()
    }
}

impl FromIterator<ConfigInstance> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = ConfigInstance>>(iter: I) -> Self {
        let mut map = ConfigMap::new();
        for instance in iter {
            map.insert(instance);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct PortConfig {
        port: u16,
    }

    impl ConfigModel for PortConfig {
        fn check(&self) -> Vec<FieldViolation> {
            if self.port == 0 {
                vec![FieldViolation::new("port", "port must be non-zero")]
            } else {
                Vec::new()
            }
        }
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct NameConfig {
        #[allow(dead_code)]
        name: String,
    }

    impl ConfigModel for NameConfig {}

    #[test]
    fn config_type_identity_follows_rust_type() {
        let port = ConfigType::of::<PortConfig>();
        assert_eq!(port, ConfigType::of::<PortConfig>());
        assert_ne!(port, ConfigType::of::<NameConfig>());
        assert_eq!(port.name(), "PortConfig");
        assert!(port.type_name().ends_with("::PortConfig"));
        assert!(port.is::<PortConfig>());
        assert_eq!(format!("{port}"), "PortConfig");
    }

    #[test]
    fn decode_runs_model_checks() {
        let port = ConfigType::of::<PortConfig>();
        let instance = port.decode(json!({ "port": 8080 })).expect("decode");
        assert_eq!(
            instance.downcast_ref::<PortConfig>(),
            Some(&PortConfig { port: 8080 })
        );

        let violations = port.decode(json!({ "port": 0 })).unwrap_err();
        assert_eq!(
            violations,
            vec![FieldViolation::new("port", "port must be non-zero")]
        );
    }

    #[test]
    fn decode_failure_is_reported_at_root() {
        let violations = ConfigType::of::<PortConfig>()
            .decode(json!({ "port": "http" }))
            .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, ROOT_FIELD_PATH);
    }

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct LimitsConfig {
        total: i64,
        ratio: f64,
        counts: Vec<u32>,
    }

    impl ConfigModel for LimitsConfig {}

    #[test]
    fn integral_floats_decode_as_integers() {
        let instance = ConfigType::of::<LimitsConfig>()
            .decode(json!({ "total": 10.0, "ratio": 2, "counts": [1.0, 2] }))
            .expect("decode");
        assert_eq!(
            instance.downcast_ref::<LimitsConfig>(),
            Some(&LimitsConfig {
                total: 10,
                ratio: 2.0,
                counts: vec![1, 2],
            })
        );
    }

    #[test]
    fn schema_bounds_sized_integers() {
        let schema = ConfigType::of::<LimitsConfig>().json_schema();
        let total = &schema["properties"]["total"];
        assert_eq!(total["minimum"], json!(i64::MIN));
        assert_eq!(total["maximum"], json!(i64::MAX));
        let counts = &schema["properties"]["counts"]["items"];
        assert_eq!(counts["minimum"], json!(0));
        assert_eq!(counts["maximum"], json!(u32::MAX));
        assert!(schema["properties"]["ratio"].get("maximum").is_none());
    }

    #[test]
    fn schema_lists_model_fields() {
        let schema = ConfigType::of::<PortConfig>().json_schema();
        assert!(schema["properties"]["port"].is_object());
        assert_eq!(schema["required"], json!(["port"]));
    }

    #[test]
    fn config_map_keys_instances_by_type() {
        let map: ConfigMap = [
            ConfigInstance::new(PortConfig { port: 1 }),
            ConfigInstance::new(PortConfig { port: 2 }),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get::<PortConfig>(), Some(&PortConfig { port: 2 }));
        assert!(map.get::<NameConfig>().is_none());
        assert!(!map.contains(&ConfigType::of::<NameConfig>()));
        assert_eq!(map.config_types(), vec![ConfigType::of::<PortConfig>()]);
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let instance = ConfigInstance::new(PortConfig { port: 1 });
        assert!(instance.downcast_ref::<NameConfig>().is_none());
        assert_eq!(instance.config_type(), ConfigType::of::<PortConfig>());
    }

    #[test]
    fn empty_field_path_becomes_root() {
        assert_eq!(FieldViolation::new("", "bad").path, ROOT_FIELD_PATH);
    }
}
