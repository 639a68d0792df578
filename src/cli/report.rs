//! Report formatting and printing utilities.
//!
//! Everything here writes to a caller-supplied writer so the output can be
//! checked in tests; the commands decide between stdout and stderr.

use std::io::Write;

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::{
    files::{FileCollection, FileSet, UpdateCollection},
    sync::SyncReport,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Upload,
    Update,
}

impl SyncAction {
    fn past_tense(self) -> &'static str {
        match self {
            SyncAction::Upload => "Uploaded",
            SyncAction::Update => "Updated",
        }
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Print folders, batches and keys of a file set.
pub fn print_selection_to<W: Write + ?Sized>(set: &FileSet, verbose: bool, writer: &mut W) {
    if !set.folders.is_empty() {
        let _ = writeln!(writer, "{}", "Folders:".bold());
        for folder in set.folders.iter() {
            let _ = writeln!(writer, "  {}/", folder);
        }
    }

    for (index, batch) in set.batches.iter().enumerate() {
        let _ = writeln!(
            writer,
            "{}",
            format!("Batch {} ({}):", index + 1, plural(batch.len(), "file", "files")).bold()
        );
        print_batch(batch, None, writer);
    }

    print_skipped_to(&set.skipped, verbose, writer);

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Selected {} in {} ({})",
            plural(set.file_count(), "file", "files"),
            plural(set.batch_count(), "batch", "batches"),
            plural(set.folders.len(), "folder", "folders")
        )
        .green()
    );
}

/// Keys of one batch, with export patterns (or renames) aligned in a column.
fn print_batch<W: Write + ?Sized>(
    batch: &FileCollection,
    update: Option<&UpdateCollection>,
    writer: &mut W,
) {
    let key_width = batch
        .keys()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);

    for key in batch.keys() {
        let target = update
            .and_then(|u| u.new_name(key))
            .map(|name| format!("=> {}", name))
            .or_else(|| batch.export_pattern(key).map(|p| format!("-> {}", p)));

        match target {
            Some(target) => {
                let padding = key_width - UnicodeWidthStr::width(key);
                let _ = writeln!(
                    writer,
                    "  {}{:padding$}  {}",
                    key,
                    "",
                    target.dimmed(),
                    padding = padding
                );
            }
            None => {
                let _ = writeln!(writer, "  {}", key);
            }
        }
    }
}

/// List skipped files in verbose mode, otherwise warn about their number.
pub fn print_skipped_to<W: Write + ?Sized>(skipped: &[String], verbose: bool, writer: &mut W) {
    if skipped.is_empty() {
        return;
    }

    if verbose {
        let _ = writeln!(writer, "{}", "Skipped (no translatable content):".bold());
        for key in skipped {
            let _ = writeln!(writer, "  {}", key.dimmed());
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} without translatable content skipped (use {} for details)",
            "warning:".bold().yellow(),
            plural(skipped.len(), "file", "files"),
            "-v".cyan()
        );
    }
}

/// Print batches of an update, showing renames.
pub fn print_update_batches_to<W: Write + ?Sized>(set: &FileSet<UpdateCollection>, writer: &mut W) {
    for (index, batch) in set.batches.iter().enumerate() {
        let _ = writeln!(
            writer,
            "{}",
            format!("Batch {} ({}):", index + 1, plural(batch.len(), "file", "files")).bold()
        );
        print_batch(batch.collection(), Some(batch), writer);
    }
}

/// Warn about `--rename` arguments that matched no selected file.
pub fn print_unmatched_renames_to<W: Write + ?Sized>(keys: &[String], writer: &mut W) {
    for key in keys {
        let _ = writeln!(
            writer,
            "{} rename ignored, \"{}\" is not among the selected files",
            "warning:".bold().yellow(),
            key
        );
    }
}

/// Print the outcome of a sync run.
pub fn print_sync_report_to<W: Write + ?Sized>(report: &SyncReport, action: SyncAction, writer: &mut W) {
    for batch in report.failed_batches() {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            FAILURE_MARK.red(),
            format!("Batch {} failed", batch.index + 1).red(),
            batch.error.as_deref().unwrap_or_default()
        );
    }

    let failed = report.failed_batches().count();
    if failed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} {} in {}",
                action.past_tense(),
                plural(report.files_sent(), "file", "files"),
                plural(report.batches.len(), "batch", "batches")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} of {} failed ({} {})",
                failed,
                plural(report.batches.len(), "batch", "batches"),
                plural(report.files_sent(), "file", "files"),
                action.past_tense().to_lowercase()
            )
            .red()
        );
    }
}
