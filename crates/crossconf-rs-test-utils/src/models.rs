//! Small configuration models used by registry, loader and runner tests.

use crossconf_rs_protocol::{ConfigModel, FieldViolation};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct Alpha {
    pub name: String,
    pub count: u32,
}

impl ConfigModel for Alpha {
    fn check(&self) -> Vec<FieldViolation> {
        if self.name.is_empty() {
            vec![FieldViolation::new("name", "name must not be empty")]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct Beta {
    pub enabled: bool,
}

impl ConfigModel for Beta {}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct Gamma {
    pub entries: Vec<GammaEntry>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct GammaEntry {
    pub label: String,
}

impl ConfigModel for Gamma {}
