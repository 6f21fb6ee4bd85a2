use crossconf_rs_protocol::ConfigModel;
use schemars::JsonSchema;
use serde::Deserialize;

/// Features and the subfeatures each one references.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct FeatureConfig {
    pub features: Vec<SingleFeatureConfig>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct SingleFeatureConfig {
    pub name: String,
    /// Names of subfeatures defined in `SubFeatureConfig`.
    #[serde(default)]
    pub subfeature_names: Vec<String>,
}

impl FeatureConfig {
    pub const SOURCE_KEY: &'static str = "FeatureConfig.json";

    /// Whether a feature with `name` is declared.
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|feature| feature.name == name)
    }
}

impl ConfigModel for FeatureConfig {}
