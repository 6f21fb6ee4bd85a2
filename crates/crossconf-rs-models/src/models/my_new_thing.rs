use crossconf_rs_protocol::ConfigModel;
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct MyNewThingConfig {
    pub name: String,
    pub statuses: Vec<String>,
}

impl MyNewThingConfig {
    pub const SOURCE_KEY: &'static str = "MyNewThingConfig.json";
}

impl ConfigModel for MyNewThingConfig {}
