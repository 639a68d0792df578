//! Sending a selected file set to the translation service.
//!
//! Folders are created first, in sorted order, so every batch lands in an
//! existing directory. A failed folder aborts the run; a failed batch is
//! recorded and the remaining batches are still sent.

use anyhow::{Context, Result};

use crate::files::{FileCollection, FileSet, UpdateCollection};

pub mod manifest;

pub use manifest::{ManifestService, Request};

/// The remote side of a sync run.
pub trait TranslationService {
    fn create_folder(&mut self, path: &str) -> Result<()>;

    fn add_files(&mut self, batch: &FileCollection) -> Result<()>;

    fn update_files(&mut self, batch: &UpdateCollection) -> Result<()>;
}

/// Result of sending one batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Position of the batch in the file set.
    pub index: usize,
    pub keys: Vec<String>,
    /// `None` on success.
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub folders_created: usize,
    pub batches: Vec<BatchOutcome>,
}

impl SyncReport {
    pub fn failed_batches(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.batches.iter().filter(|b| !b.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failed_batches().next().is_some()
    }

    pub fn files_sent(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| b.is_success())
            .map(|b| b.keys.len())
            .sum()
    }
}

/// Upload new files.
pub fn upload(service: &mut dyn TranslationService, set: &FileSet) -> Result<SyncReport> {
    run(service, set, |service, batch| {
        (batch.keys().map(str::to_string).collect(), service.add_files(batch))
    })
}

/// Update files that already exist remotely.
pub fn update(
    service: &mut dyn TranslationService,
    set: &FileSet<UpdateCollection>,
) -> Result<SyncReport> {
    run(service, set, |service, batch| {
        (
            batch.collection().keys().map(str::to_string).collect(),
            service.update_files(batch),
        )
    })
}

fn run<T>(
    service: &mut dyn TranslationService,
    set: &FileSet<T>,
    mut send: impl FnMut(&mut dyn TranslationService, &T) -> (Vec<String>, Result<()>),
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for folder in set.folders.iter() {
        service
            .create_folder(folder)
            .with_context(|| format!("Failed to create folder \"{}\"", folder))?;
        report.folders_created += 1;
    }

    for (index, batch) in set.batches.iter().enumerate() {
        let (keys, result) = send(&mut *service, batch);
        report.batches.push(BatchOutcome {
            index,
            keys,
            error: result.err().map(|e| format!("{:#}", e)),
        });
    }

    Ok(report)
}
