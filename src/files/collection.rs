use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;

use super::{FormatOptions, paths::parent_folder};

/// One selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Base-path-relative path with `/` separators.
    pub key: String,
    pub absolute_path: PathBuf,
    pub export_pattern: Option<String>,
    pub title: Option<String>,
}

impl ResolvedFile {
    pub fn new(key: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            absolute_path: absolute_path.into(),
            export_pattern: None,
            title: None,
        }
    }
}

/// Files keyed by upload key, plus per-key export patterns and titles.
///
/// Every key in `export_patterns` or `titles` is also a key in `files`;
/// [`FileCollection::insert`] is the only way in, which keeps it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileCollection {
    files: IndexMap<String, PathBuf>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    export_patterns: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    titles: IndexMap<String, String>,
    #[serde(flatten)]
    options: FormatOptions,
}

impl FileCollection {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Add a file, replacing everything previously stored under its key.
    pub fn insert(&mut self, file: ResolvedFile) {
        let ResolvedFile {
            key,
            absolute_path,
            export_pattern,
            title,
        } = file;

        match export_pattern {
            Some(pattern) => {
                self.export_patterns.insert(key.clone(), pattern);
            }
            None => {
                self.export_patterns.shift_remove(&key);
            }
        }
        match title {
            Some(title) => {
                self.titles.insert(key.clone(), title);
            }
            None => {
                self.titles.shift_remove(&key);
            }
        }
        self.files.insert(key, absolute_path);
    }

    pub fn get(&self, key: &str) -> Option<ResolvedFile> {
        let absolute_path = self.files.get(key)?;
        Some(ResolvedFile {
            key: key.to_string(),
            absolute_path: absolute_path.clone(),
            export_pattern: self.export_patterns.get(key).cloned(),
            title: self.titles.get(key).cloned(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn files(&self) -> &IndexMap<String, PathBuf> {
        &self.files
    }

    pub fn export_pattern(&self, key: &str) -> Option<&str> {
        self.export_patterns.get(key).map(String::as_str)
    }

    pub fn export_patterns(&self) -> &IndexMap<String, String> {
        &self.export_patterns
    }

    pub fn titles(&self) -> &IndexMap<String, String> {
        &self.titles
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

/// Collection for updating files that already exist remotely.
///
/// Adds optional renames: the file stored under a key is uploaded under
/// its new name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateCollection {
    #[serde(flatten)]
    collection: FileCollection,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    new_names: IndexMap<String, String>,
}

impl UpdateCollection {
    /// Record a rename. Returns `false` if `key` is not part of the collection.
    pub fn rename(&mut self, key: &str, new_name: impl Into<String>) -> bool {
        if !self.collection.contains_key(key) {
            return false;
        }
        self.new_names.insert(key.to_string(), new_name.into());
        true
    }

    pub fn new_name(&self, key: &str) -> Option<&str> {
        self.new_names.get(key).map(String::as_str)
    }

    pub fn new_names(&self) -> &IndexMap<String, String> {
        &self.new_names
    }

    pub fn collection(&self) -> &FileCollection {
        &self.collection
    }

    pub(crate) fn collection_mut(&mut self) -> &mut FileCollection {
        &mut self.collection
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

impl From<FileCollection> for UpdateCollection {
    fn from(collection: FileCollection) -> Self {
        Self {
            collection,
            new_names: IndexMap::new(),
        }
    }
}

/// Remote directories needed to hold a set of files.
///
/// Sorted, so every folder comes after its ancestors once [`FolderSet::complete`]
/// has added them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FolderSet(BTreeSet<String>);

impl FolderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the folder holding `key`, if it isn't at the base path root.
    pub fn add_parent_of(&mut self, key: &str) {
        if let Some(parent) = parent_folder(key) {
            self.0.insert(parent.to_string());
        }
    }

    /// Add every ancestor of every folder already in the set.
    pub fn complete(&mut self) {
        let ancestors: Vec<String> = self
            .0
            .iter()
            .flat_map(|folder| {
                Path::new(folder)
                    .ancestors()
                    .skip(1)
                    .filter_map(|a| a.to_str())
                    .filter(|a| !a.is_empty() && *a != "/" && *a != ".")
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        self.0.extend(ancestors);
    }

    pub fn contains(&self, folder: &str) -> bool {
        self.0.contains(folder)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
