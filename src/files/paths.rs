//! Base path resolution and file key computation.

use std::path::{Component, Path, PathBuf};

use super::SelectError;
use crate::fs::FileSystem;

/// Resolve the configured base path against the current directory.
///
/// `.` means the current directory itself; anything else is joined onto it
/// and normalized, so an absolute base path is used as-is.
pub fn effective_base_path(fs: &dyn FileSystem, base_path: &str) -> Result<PathBuf, SelectError> {
    let current_dir = fs.current_dir().map_err(|source| SelectError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    if base_path == "." {
        return Ok(current_dir);
    }

    Ok(fs.normalize(&current_dir.join(base_path)))
}

/// Key of `file` relative to `base`, with `/` separators.
///
/// Returns `None` when the file does not live under the base path.
pub fn file_key(base: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(base).ok()?;
    let key = to_slash(relative);
    (!key.is_empty()).then_some(key)
}

/// Join the normal components of a path with `/`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Key for a path given verbatim on the command line.
///
/// Separators become `/` and `.` segments are dropped; `..` is kept.
pub fn explicit_key(path: &str) -> String {
    let path = path.replace('\\', "/");
    let key = path
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/");
    if path.starts_with('/') {
        format!("/{}", key)
    } else {
        key
    }
}

/// Parent folder of a key, or `None` for keys at the base path root.
pub fn parent_folder(key: &str) -> Option<&str> {
    let (parent, _) = key.rsplit_once('/')?;
    let parent = parent.trim_end_matches('/');
    (!parent.is_empty() && parent != ".").then_some(parent)
}
