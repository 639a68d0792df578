//! A [`TranslationService`] that records requests instead of sending them.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use super::TranslationService;
use crate::files::{FileCollection, UpdateCollection};

/// One request as it would be sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    CreateFolder { path: String },
    AddFiles { batch: FileCollection },
    UpdateFiles { batch: UpdateCollection },
}

#[derive(Debug, Default, Serialize)]
pub struct ManifestService {
    requests: Vec<Request>,
}

impl ManifestService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Write all recorded requests as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).context("Failed to serialize manifest")?;
        writeln!(writer).context("Failed to write manifest")?;
        Ok(())
    }
}

impl TranslationService for ManifestService {
    fn create_folder(&mut self, path: &str) -> Result<()> {
        self.requests.push(Request::CreateFolder {
            path: path.to_string(),
        });
        Ok(())
    }

    fn add_files(&mut self, batch: &FileCollection) -> Result<()> {
        self.requests.push(Request::AddFiles {
            batch: batch.clone(),
        });
        Ok(())
    }

    fn update_files(&mut self, batch: &UpdateCollection) -> Result<()> {
        self.requests.push(Request::UpdateFiles {
            batch: batch.clone(),
        });
        Ok(())
    }
}
