//! `upload` and `update`: select files, then run them through the manifest service.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use super::super::{
    args::{UpdateCommand, UploadCommand},
    exit_status::ExitStatus,
    report::{self, SyncAction},
};
use super::context::SelectContext;
use crate::{
    fs::OsFileSystem,
    sync::{self, ManifestService, SyncReport},
};

pub fn upload(cmd: UploadCommand) -> Result<ExitStatus> {
    let context = SelectContext::new(&cmd.args)?;
    let set = context.select(&OsFileSystem)?.into_file_set();

    let mut service = ManifestService::new();
    let sync_report = sync::upload(&mut service, &set)?;

    finish(&service, &sync_report, cmd.output.as_deref(), |out| {
        report::print_skipped_to(&set.skipped, context.verbose, out);
        report::print_sync_report_to(&sync_report, SyncAction::Upload, out);
    })
}

pub fn update(cmd: UpdateCommand) -> Result<ExitStatus> {
    let context = SelectContext::new(&cmd.args)?;
    let (set, unmatched) = context
        .select(&OsFileSystem)?
        .into_update_set(&cmd.renames);

    let mut service = ManifestService::new();
    let sync_report = sync::update(&mut service, &set)?;

    finish(&service, &sync_report, cmd.output.as_deref(), |out| {
        report::print_unmatched_renames_to(&unmatched, out);
        if context.verbose {
            report::print_update_batches_to(&set, out);
        }
        report::print_skipped_to(&set.skipped, context.verbose, out);
        report::print_sync_report_to(&sync_report, SyncAction::Update, out);
    })
}

/// Write the manifest, then the status report.
///
/// The status goes to stderr when the manifest takes stdout.
fn finish(
    service: &ManifestService,
    sync_report: &SyncReport,
    output: Option<&Path>,
    print_status: impl FnOnce(&mut dyn Write),
) -> Result<ExitStatus> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            service.write_json(&mut writer)?;
            writer
                .flush()
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_status(&mut io::stdout().lock());
        }
        None => {
            service.write_json(io::stdout().lock())?;
            print_status(&mut io::stderr().lock());
        }
    }

    Ok(ExitStatus::from_failures(sync_report.has_failures()))
}
