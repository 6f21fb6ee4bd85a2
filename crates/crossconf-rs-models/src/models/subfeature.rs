use crossconf_rs_protocol::ConfigModel;
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct SubFeatureConfig {
    pub subfeatures: Vec<SingleSubFeatureConfig>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct SingleSubFeatureConfig {
    pub name: String,
}

impl SubFeatureConfig {
    pub const SOURCE_KEY: &'static str = "SubFeatureConfig.json";
}

impl ConfigModel for SubFeatureConfig {}
