//! Configuration models and the filenames they are loaded from.

mod database;
mod feature;
mod my_new_thing;
mod some_new;
mod subfeature;

pub use database::DatabaseConfig;
pub use feature::{FeatureConfig, SingleFeatureConfig};
pub use my_new_thing::MyNewThingConfig;
pub use some_new::SomeNewConfig;
pub use subfeature::{SingleSubFeatureConfig, SubFeatureConfig};

use crossconf_rs_config::SchemaRegistry;
use crossconf_rs_protocol::RegistryError;

/// Register every model under its source filename.
pub fn register_models(registry: &mut SchemaRegistry) -> Result<(), RegistryError> {
    registry.register::<FeatureConfig>(FeatureConfig::SOURCE_KEY)?;
    registry.register::<SubFeatureConfig>(SubFeatureConfig::SOURCE_KEY)?;
    registry.register::<DatabaseConfig>(DatabaseConfig::SOURCE_KEY)?;
    registry.register::<MyNewThingConfig>(MyNewThingConfig::SOURCE_KEY)?;
    registry.register::<SomeNewConfig>(SomeNewConfig::SOURCE_KEY)?;
    Ok(())
}
