//! Cross-file validation for crossconf.
//!
//! This crate owns the validation rule registry, the runner that executes
//! rules whose inputs are all loaded, and the pipeline that ties loading and
//! cross-file validation together.

pub mod pipeline;
pub mod registry;
pub mod rule;
pub mod runner;

pub use pipeline::{ConfigPipeline, ConfigPipelineBuilder, PipelineReport};
pub use registry::ValidationRegistry;
pub use rule::{IntoValidationRule, ValidationRule};
pub use runner::{RunReport, SkippedRule, ValidationRunner};
