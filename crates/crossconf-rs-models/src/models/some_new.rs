use crossconf_rs_protocol::ConfigModel;
use schemars::JsonSchema;
use serde::Deserialize;

/// Tunables read by feature-specific rules.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct SomeNewConfig {
    pub required_field: i64,
}

impl SomeNewConfig {
    pub const SOURCE_KEY: &'static str = "SomeNewConfig.json";
}

impl ConfigModel for SomeNewConfig {}
