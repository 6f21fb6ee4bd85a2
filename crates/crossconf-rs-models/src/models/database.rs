use crossconf_rs_protocol::ConfigModel;
use schemars::JsonSchema;
use serde::Deserialize;

/// At least one non-whitespace character.
const HOST_PATTERN: &str = r"\S";
/// Decimal TCP port, 0 through 65535.
const PORT_PATTERN: &str =
    r"^([0-9]{1,4}|[1-5][0-9]{4}|6[0-4][0-9]{3}|65[0-4][0-9]{2}|655[0-2][0-9]|6553[0-5])$";

/// Database connection settings.
///
/// `port` is kept as a string, as it appears in the source file. Both fields
/// are constrained in the schema so their problems are reported together
/// with any other field errors.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
pub struct DatabaseConfig {
    #[schemars(regex(pattern = HOST_PATTERN))]
    pub host: String,
    #[schemars(regex(pattern = PORT_PATTERN))]
    pub port: String,
}

impl DatabaseConfig {
    pub const SOURCE_KEY: &'static str = "DatabaseConfig.json";

    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }
}

impl ConfigModel for DatabaseConfig {}
