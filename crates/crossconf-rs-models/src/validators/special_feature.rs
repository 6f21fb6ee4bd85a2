use crate::models::{FeatureConfig, SomeNewConfig};
use crossconf_rs_protocol::CrossConfigError;

/// Feature whose presence requires a minimum `required_field`.
pub const SPECIAL_FEATURE: &str = "SpecialFeature";
pub const SPECIAL_FEATURE_MINIMUM: i64 = 50;

/// `SpecialFeature` needs `required_field` of at least 50.
pub fn special_feature_requires_minimum(
    features: &FeatureConfig,
    settings: &SomeNewConfig,
) -> Vec<CrossConfigError> {
    if !features.has_feature(SPECIAL_FEATURE)
        || settings.required_field >= SPECIAL_FEATURE_MINIMUM
    {
        return Vec::new();
    }
    vec![
        CrossConfigError::new(format!(
            "{SPECIAL_FEATURE} requires required_field >= {SPECIAL_FEATURE_MINIMUM}"
        ))
        .with_detail("required_field", settings.required_field),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SingleFeatureConfig;
    use pretty_assertions::assert_eq;

    fn features(names: &[&str]) -> FeatureConfig {
        FeatureConfig {
            features: names
                .iter()
                .map(|name| SingleFeatureConfig {
                    name: name.to_string(),
                    subfeature_names: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn flags_low_value_when_special_feature_is_present() {
        let errors = special_feature_requires_minimum(
            &features(&["SpecialFeature"]),
            &SomeNewConfig { required_field: 10 },
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].details["required_field"], "10");
    }

    #[test]
    fn boundary_value_passes() {
        let errors = special_feature_requires_minimum(
            &features(&["SpecialFeature"]),
            &SomeNewConfig { required_field: 50 },
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn ignored_without_special_feature() {
        let errors = special_feature_requires_minimum(
            &features(&["Search"]),
            &SomeNewConfig { required_field: 0 },
        );
        assert!(errors.is_empty());
    }
}
