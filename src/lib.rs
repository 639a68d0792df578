//! l10nsync - select and batch localizable files for a translation service
//!
//! l10nsync resolves a JSON configuration of source patterns into the files
//! worth translating, drops RESX and XML files without translatable content,
//! and groups the rest into capped batches ready to be sent.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reports)
//! - `config`: Configuration file loading and validation
//! - `files`: Pattern resolution, content filters, collections and batching
//! - `fs`: Filesystem access behind a trait, with an in-memory implementation
//! - `sync`: Sending batches to a translation service

pub mod cli;
pub mod config;
pub mod files;
pub mod fs;
pub mod sync;
