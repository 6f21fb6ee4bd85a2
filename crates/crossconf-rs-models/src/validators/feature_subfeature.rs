use crate::models::{FeatureConfig, SubFeatureConfig};
use crossconf_rs_protocol::CrossConfigError;
use std::collections::{BTreeSet, HashSet};

/// Every subfeature a feature references must be defined.
///
/// Reports one error per undefined name, in name order.
pub fn feature_references_defined_subfeatures(
    features: &FeatureConfig,
    subfeatures: &SubFeatureConfig,
) -> Vec<CrossConfigError> {
    let defined = subfeatures
        .subfeatures
        .iter()
        .map(|subfeature| subfeature.name.as_str())
        .collect::<HashSet<_>>();
    let referenced = features
        .features
        .iter()
        .flat_map(|feature| feature.subfeature_names.iter().map(String::as_str))
        .collect::<BTreeSet<_>>();

    referenced
        .into_iter()
        .filter(|name| !defined.contains(name))
        .map(|name| {
            CrossConfigError::new("Referenced subfeature is undefined")
                .with_detail("undefined_subfeature", name)
        })
        .collect()
}
