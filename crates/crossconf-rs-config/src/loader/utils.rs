//! Helper utilities for source discovery.

use crossconf_rs_protocol::{InfrastructureKind, LoaderInfrastructureError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Compile the loader's filename patterns into a matcher.
pub(super) fn build_matcher(
    patterns: &[String],
    directory: &Path,
) -> Result<GlobSet, LoaderInfrastructureError> {
    let pattern_error = |message: String| {
        LoaderInfrastructureError::new(
            directory.display().to_string(),
            InfrastructureKind::Pattern,
            message,
        )
    };
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| pattern_error(err.to_string()))?;
        builder.add(glob);
    }
    builder.build().map_err(|err| pattern_error(err.to_string()))
}

/// List entries directly inside `directory` whose names match, sorted by
/// filename so enumeration order is stable.
///
/// Subdirectories are skipped. Anything else is kept, so a dangling symlink
/// surfaces as a read failure for its source key.
pub(super) fn list_sources(
    directory: &Path,
    matcher: &GlobSet,
) -> Result<Vec<PathBuf>, LoaderInfrastructureError> {
    let read_error = |err: std::io::Error| {
        LoaderInfrastructureError::new(
            directory.display().to_string(),
            InfrastructureKind::Read,
            err.to_string(),
        )
    };
    let mut sources = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            continue;
        }
        let matches = path
            .file_name()
            .is_some_and(|file_name| matcher.is_match(Path::new(file_name)));
        if matches {
            sources.push(path);
        }
    }
    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}
