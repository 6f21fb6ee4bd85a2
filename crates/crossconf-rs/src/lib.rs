//! Public SDK surface for crossconf.
//!
//! This crate re-exports the building blocks and provides small helpers shared
//! by the `crossconf` binary and embedding applications.

/// Re-export for convenience.
pub use crossconf_rs_config as config;
pub use crossconf_rs_core as core;
/// Re-export for convenience.
pub use crossconf_rs_models as models;
/// Re-export for convenience.
pub use crossconf_rs_protocol as protocol;

use anyhow::Context;
use crossconf_rs_protocol::{ErrorPolicy, ValidationError};
use log::info;
use std::path::Path;

/// Message printed when a directory passes every check.
pub const ALL_PASSED_MESSAGE: &str = "All cross-file validations passed!";

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Check `directory` with the bundled models and rules.
///
/// Returns every reported error: load errors first, then cross-file errors.
/// Under `ErrorPolicy::FailFast` this is the batch that stopped the check.
pub fn check_directory(
    directory: impl AsRef<Path>,
    policy: ErrorPolicy,
) -> anyhow::Result<Vec<ValidationError>> {
    let directory = directory.as_ref();
    let pipeline =
        crossconf_rs_models::default_pipeline().context("register bundled models and rules")?;
    info!("checking config directory (dir={})", directory.display());
    match pipeline.check(directory, policy) {
        Ok(report) => Ok(report.all_errors()),
        Err(aggregate) => Ok(aggregate.into_errors()),
    }
}
