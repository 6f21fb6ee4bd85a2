//! IO helpers for reading config sources from disk.

use crossconf_rs_protocol::{InfrastructureKind, LoaderInfrastructureError};
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Syntax a source is parsed with, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SourceFormat {
    /// Strict JSON.
    Json,
    /// JSON5 (comments, trailing commas, unquoted keys).
    Json5,
}

impl SourceFormat {
    pub(super) fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json5") => SourceFormat::Json5,
            _ => SourceFormat::Json,
        }
    }
}

/// Read and parse a source into raw JSON.
pub(super) fn read_source(
    path: &Path,
    source_key: &str,
) -> Result<Value, LoaderInfrastructureError> {
    let format = SourceFormat::for_path(path);
    debug!(
        "reading config source (source_key={}, format={:?}, path={})",
        source_key,
        format,
        path.display()
    );
    let contents = fs::read_to_string(path).map_err(|err| {
        LoaderInfrastructureError::new(source_key, InfrastructureKind::Read, err.to_string())
    })?;
    parse_source(&contents, format).map_err(|message| {
        LoaderInfrastructureError::new(source_key, InfrastructureKind::Parse, message)
    })
}

/// Parse source contents in the given format.
pub(super) fn parse_source(contents: &str, format: SourceFormat) -> Result<Value, String> {
    match format {
        SourceFormat::Json => serde_json::from_str(contents).map_err(|err| err.to_string()),
        SourceFormat::Json5 => json5::from_str(contents).map_err(|err| err.to_string()),
    }
}
