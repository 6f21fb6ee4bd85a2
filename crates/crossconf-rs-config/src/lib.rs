//! Per-file configuration loading.
//!
//! This crate owns the schema registry (filename to configuration type), the
//! structural validator boundary, and the directory loader that turns raw
//! files into a `LoadOutcome`.

mod loader;
mod registry;
mod schema;

/// Directory loader, its options, and the load result.
pub use loader::{ConfigLoader, LoadOutcome, LoaderOptions};
/// Filename to configuration type registry.
pub use registry::SchemaRegistry;
/// Structural validation boundary and the default JSON Schema implementation.
pub use schema::{SchemaValidator, StructuralValidator};
