//! File selection pipeline.
//!
//! Source patterns are resolved against the base path ([`pattern`]), matches
//! are checked for translatable content ([`filters`]), gathered into keyed
//! collections ([`builder`]) and finally split into batches ([`batch`]).

pub mod batch;
pub mod builder;
mod collection;
mod error;
pub mod filters;
mod options;
pub mod paths;
pub mod pattern;

pub use batch::{Batchable, MAX_FILES_PER_BATCH, into_batches};
pub use builder::{FileSet, Selection, select};
pub use collection::{FileCollection, FolderSet, ResolvedFile, UpdateCollection};
pub use error::SelectError;
pub use options::FormatOptions;
