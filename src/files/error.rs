use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while turning source patterns into file collections.
///
/// None of these are retried; each aborts the resolution pass that hit it.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(
        "Unsupported path: \"{}\" is outside of base path \"{}\" (source: \"{pattern}\")",
        path.display(),
        base_path.display()
    )]
    UnsupportedPath {
        base_path: PathBuf,
        path: PathBuf,
        pattern: String,
    },

    #[error(
        "Pattern syntax is not supported yet. Feel free to submit a pull request that implements it: {pattern}"
    )]
    UnimplementedSyntax { pattern: String },

    #[error("Invalid file name pattern in \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Invalid query \"{query}\": {reason}")]
    InvalidQuery { query: String, reason: String },
}

impl SelectError {
    /// Wrap a directory enumeration error, keeping missing directories distinguishable.
    pub(crate) fn enumeration(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SelectError::DirectoryNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SelectError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
