//! Filesystem access for the selection pipeline.
//!
//! Everything the pattern resolver and the content filters touch on disk goes
//! through [`FileSystem`], so the whole pipeline can run against
//! [`MemoryFileSystem`] in tests.

use std::{
    io,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern, PatternError};
use path_clean::PathClean;
use walkdir::WalkDir;

mod memory;

pub use memory::MemoryFileSystem;

/// The filesystem operations the selection pipeline depends on.
pub trait FileSystem {
    /// Directory that relative base paths are resolved against.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Lexically normalize a path: resolves `.` and `..` and drops redundant
    /// separators without touching the disk.
    fn normalize(&self, path: &Path) -> PathBuf {
        path.clean()
    }

    /// List files under `dir` whose file name matches `name`.
    ///
    /// Only direct children are returned unless `recursive` is set. A missing
    /// directory is reported as [`io::ErrorKind::NotFound`]. Results are sorted.
    fn enumerate_files(
        &self,
        dir: &Path,
        name: &NamePattern,
        recursive: bool,
    ) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// File-name matcher for the last segment of a source pattern.
///
/// `*` is the only wildcard. Everything else, `?` and brackets included, must
/// match literally.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Literal(String),
    Glob(Pattern),
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.contains('*') {
            let escaped = pattern
                .split('*')
                .map(Pattern::escape)
                .collect::<Vec<_>>()
                .join("*");
            Ok(NamePattern::Glob(Pattern::new(&escaped)?))
        } else {
            Ok(NamePattern::Literal(pattern.to_string()))
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Literal(literal) if case_sensitive() => literal == name,
            NamePattern::Literal(literal) => literal.eq_ignore_ascii_case(name),
            NamePattern::Glob(pattern) => pattern.matches_with(name, match_options()),
        }
    }
}

fn case_sensitive() -> bool {
    !cfg!(windows)
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: case_sensitive(),
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

pub(crate) fn directory_not_found(dir: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("directory not found: {}", dir.display()),
    )
}

/// [`FileSystem`] backed by the real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn enumerate_files(
        &self,
        dir: &Path,
        name: &NamePattern,
        recursive: bool,
    ) -> io::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(directory_not_found(dir));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if entry.file_name().to_str().is_some_and(|n| name.matches(n)) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
