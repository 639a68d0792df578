//! Source pattern resolution.
//!
//! Supports a deliberately small glob subset:
//!
//! - plain paths: `strings/app.resx`
//! - a wildcard in the file name: `strings/*.resx`
//! - recursion through a trailing `**` directory: `strings/**/*.resx`
//!
//! Wildcards anywhere else in the directory part (`*/app.resx`,
//! `a/**/b/*.resx`, `a/***/*.resx`) are rejected with
//! [`SelectError::UnimplementedSyntax`] instead of being matched partially.

use std::path::{Path, PathBuf};

use super::SelectError;
use crate::fs::{FileSystem, NamePattern};

const RECURSIVE_MARKER: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Direct children of the pattern directory only.
    TopDirectoryOnly,
    /// The pattern directory and every directory below it.
    AllDirectories,
}

/// Files matched by one source pattern.
#[derive(Debug)]
pub struct PatternMatch {
    pub directory: PathBuf,
    pub mode: SearchMode,
    pub files: Vec<PathBuf>,
}

/// Split a source into its directory part and its file-name part.
///
/// Leading separators are dropped: sources are always relative to the base path.
fn split_source(source: &str) -> (&str, &str) {
    let source = source.trim_start_matches(['/', '\\']);
    match source.rfind(['/', '\\']) {
        Some(idx) => (&source[..idx], &source[idx + 1..]),
        None => ("", source),
    }
}

/// Expand one source pattern into the files it matches under `base`.
pub fn resolve_pattern(
    fs: &dyn FileSystem,
    base: &Path,
    source: &str,
) -> Result<PatternMatch, SelectError> {
    let (dir_part, name_part) = split_source(source);

    // Wildcards are checked on the source as written, before `..` can hide them.
    let mut segments: Vec<&str> = dir_part
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();
    let mode = if segments.last() == Some(&RECURSIVE_MARKER) {
        segments.pop();
        SearchMode::AllDirectories
    } else {
        SearchMode::TopDirectoryOnly
    };

    let directory = fs.normalize(
        &segments
            .iter()
            .fold(base.to_path_buf(), |dir, segment| dir.join(segment)),
    );
    if !directory.starts_with(base) {
        return Err(SelectError::UnsupportedPath {
            base_path: base.to_path_buf(),
            path: directory,
            pattern: source.to_string(),
        });
    }

    if dir_part.contains("***") || segments.iter().any(|segment| segment.contains('*')) {
        return Err(unimplemented(source));
    }

    let name = NamePattern::new(name_part).map_err(|e| SelectError::InvalidPattern {
        pattern: source.to_string(),
        reason: e.to_string(),
    })?;

    let files = fs
        .enumerate_files(&directory, &name, mode == SearchMode::AllDirectories)
        .map_err(|e| SelectError::enumeration(&directory, e))?;

    Ok(PatternMatch {
        directory,
        mode,
        files,
    })
}

fn unimplemented(source: &str) -> SelectError {
    SelectError::UnimplementedSyntax {
        pattern: source.to_string(),
    }
}
