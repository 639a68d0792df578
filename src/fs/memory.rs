use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use path_clean::PathClean;

use super::{FileSystem, NamePattern, directory_not_found};

/// In-memory [`FileSystem`] for tests and dry runs.
///
/// Directories exist implicitly as long as at least one file lives below them.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    current_dir: PathBuf,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
            files: BTreeMap::new(),
        }
    }

    /// Add a file; relative paths are placed under the current directory.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = self.current_dir.join(path).clean();
        self.files.insert(path, content.into());
    }

    fn has_directory(&self, dir: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file.starts_with(dir) && file != dir)
    }
}

impl FileSystem for MemoryFileSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn enumerate_files(
        &self,
        dir: &Path,
        name: &NamePattern,
        recursive: bool,
    ) -> io::Result<Vec<PathBuf>> {
        if !self.has_directory(dir) {
            return Err(directory_not_found(dir));
        }

        let files = self
            .files
            .keys()
            .filter(|file| {
                if recursive {
                    file.starts_with(dir) && *file != dir
                } else {
                    file.parent() == Some(dir)
                }
            })
            .filter(|file| {
                file.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| name.matches(n))
            })
            .cloned()
            .collect();

        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )
        })
    }
}
