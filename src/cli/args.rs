//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: Write a default configuration file
//! - `list`: Show which files would be sent, batch by batch
//! - `upload`: Send new files to the translation service
//! - `update`: Send files that already exist remotely, optionally renamed

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all selecting commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Configuration file (default: l10nsync.json found from the current directory upwards)
    #[arg(long, env = "L10NSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base path for source patterns (overrides config file)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SelectArgs {
    /// Files to send as-is, bypassing the configured patterns
    pub files: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub args: SelectArgs,
}

#[derive(Debug, Args)]
pub struct UploadCommand {
    #[command(flatten)]
    pub args: SelectArgs,

    /// Write the request manifest to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub args: SelectArgs,

    /// Upload the file stored under OLD as NEW.
    /// Can be specified multiple times.
    #[arg(long = "rename", value_name = "OLD=NEW", value_parser = parse_rename)]
    pub renames: Vec<(String, String)>,

    /// Write the request manifest to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_rename(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((old, new)) if !old.is_empty() && !new.is_empty() => {
            Ok((old.replace('\\', "/"), new.to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got \"{}\"", value)),
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new l10nsync.json configuration file
    Init,
    /// List the files, folders and batches that would be sent
    List(ListCommand),
    /// Upload new files to the translation service
    Upload(UploadCommand),
    /// Update existing files in the translation service
    Update(UpdateCommand),
}
