//! Cross-file rules over the bundled models.

mod feature_subfeature;
mod special_feature;

pub use feature_subfeature::feature_references_defined_subfeatures;
pub use special_feature::{
    SPECIAL_FEATURE, SPECIAL_FEATURE_MINIMUM, special_feature_requires_minimum,
};

use crossconf_rs_core::ValidationRegistry;
use crossconf_rs_protocol::RegistryError;

/// Register every bundled rule.
pub fn register_rules(registry: &mut ValidationRegistry) -> Result<(), RegistryError> {
    registry.register(
        "feature_references_defined_subfeatures",
        feature_references_defined_subfeatures,
    )?;
    registry.register(
        "special_feature_requires_minimum",
        special_feature_requires_minimum,
    )?;
    Ok(())
}
