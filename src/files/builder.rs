//! Aggregating pattern matches (or explicit files) into batched collections.

use std::path::Path;

use super::{
    FileCollection, FolderSet, FormatOptions, ResolvedFile, SelectError, UpdateCollection,
    batch::into_batches,
    filters::is_localizable,
    paths::{effective_base_path, explicit_key, file_key},
    pattern::resolve_pattern,
};
use crate::{config::Config, fs::FileSystem};

/// Files chosen for one invocation, grouped by the pattern that found them.
#[derive(Debug, Default)]
pub struct Selection {
    pub collections: Vec<FileCollection>,
    pub folders: FolderSet,
    /// Keys dropped by the content filters.
    pub skipped: Vec<String>,
}

/// A [`Selection`] split into upload-sized batches.
#[derive(Debug, Default)]
pub struct FileSet<T = FileCollection> {
    pub batches: Vec<T>,
    pub folders: FolderSet,
    pub skipped: Vec<String>,
}

impl<T> FileSet<T> {
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}

impl FileSet<FileCollection> {
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(FileCollection::len).sum()
    }
}

impl FileSet<UpdateCollection> {
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(UpdateCollection::len).sum()
    }
}

/// Select files for upload.
///
/// A non-empty `explicit_files` list bypasses the configured patterns and the
/// content filters entirely.
pub fn select(
    fs: &dyn FileSystem,
    config: &Config,
    explicit_files: &[String],
) -> Result<Selection, SelectError> {
    if explicit_files.is_empty() {
        select_from_config(fs, config)
    } else {
        select_explicit(fs, explicit_files)
    }
}

fn select_explicit(fs: &dyn FileSystem, explicit_files: &[String]) -> Result<Selection, SelectError> {
    let current_dir = fs.current_dir().map_err(|source| SelectError::Io {
        path: Path::new(".").to_path_buf(),
        source,
    })?;

    let mut selection = Selection::default();
    let mut collection = FileCollection::default();
    for file in explicit_files {
        let key = explicit_key(file);
        selection.folders.add_parent_of(&key);
        collection.insert(ResolvedFile::new(key, fs.normalize(&current_dir.join(file))));
    }
    selection.collections.push(collection);
    selection.folders.complete();

    Ok(selection)
}

fn select_from_config(fs: &dyn FileSystem, config: &Config) -> Result<Selection, SelectError> {
    let base = effective_base_path(fs, &config.base_path)?;

    let mut selection = Selection::default();
    for pattern in &config.files {
        let options: FormatOptions = pattern.format_options();
        let matched = resolve_pattern(fs, &base, &pattern.source)?;

        let mut collection = FileCollection::new(options);
        for path in matched.files {
            let Some(key) = file_key(&base, &path) else {
                continue;
            };

            if !is_localizable(fs, &path, collection.options())? {
                selection.skipped.push(key);
                continue;
            }

            selection.folders.add_parent_of(&key);
            collection.insert(ResolvedFile {
                export_pattern: pattern.translation.clone(),
                title: pattern.title.clone(),
                ..ResolvedFile::new(key, path)
            });
        }

        if !collection.is_empty() {
            selection.collections.push(collection);
        }
    }
    selection.folders.complete();

    Ok(selection)
}

impl Selection {
    pub fn file_count(&self) -> usize {
        self.collections.iter().map(FileCollection::len).sum()
    }

    /// Batch every collection on its own, so no batch mixes patterns.
    pub fn into_file_set(self) -> FileSet {
        FileSet {
            batches: self.collections.into_iter().flat_map(into_batches).collect(),
            folders: self.folders,
            skipped: self.skipped,
        }
    }

    /// Batch for updating existing files, applying `renames` (old key, new name).
    ///
    /// Renames whose key was not selected are returned alongside the set.
    pub fn into_update_set(self, renames: &[(String, String)]) -> (FileSet<UpdateCollection>, Vec<String>) {
        let mut unmatched: Vec<String> = Vec::new();
        let mut collections: Vec<UpdateCollection> = self
            .collections
            .into_iter()
            .map(UpdateCollection::from)
            .collect();

        for (key, new_name) in renames {
            let renamed = collections
                .iter_mut()
                .any(|collection| collection.rename(key, new_name.as_str()));
            if !renamed {
                unmatched.push(key.clone());
            }
        }

        let set = FileSet {
            batches: collections.into_iter().flat_map(into_batches).collect(),
            folders: self.folders,
            skipped: self.skipped,
        };
        (set, unmatched)
    }
}
