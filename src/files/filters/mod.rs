//! Content filters deciding whether a file is worth uploading.
//!
//! The set of filters is closed: RESX and XML files are inspected, everything
//! else is always considered localizable. The filter is picked by the `type`
//! hint first and the file extension second.

use std::path::Path;

use enum_dispatch::enum_dispatch;

use super::{FormatOptions, SelectError};
use crate::fs::FileSystem;

pub mod query;
mod resx;
mod xml;

pub use resx::ResxFilter;
pub use xml::XmlFilter;

#[enum_dispatch]
pub trait ContentFilter {
    /// Inspect file content. Malformed XML is an error, not a "no".
    fn is_localizable(&self, content: &str) -> Result<bool, roxmltree::Error>;
}

/// Files without a dedicated filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFilter;

impl ContentFilter for PlainFilter {
    fn is_localizable(&self, _content: &str) -> Result<bool, roxmltree::Error> {
        Ok(true)
    }
}

#[enum_dispatch(ContentFilter)]
#[derive(Debug, Clone)]
pub enum FilterKind {
    Resx(ResxFilter),
    Xml(XmlFilter),
    Plain(PlainFilter),
}

impl FilterKind {
    pub fn for_file(path: &Path, options: &FormatOptions) -> Result<Self, SelectError> {
        if options.is_xml_type() {
            return Ok(XmlFilter::new(options.translatable_elements.as_deref())?.into());
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if extension.eq_ignore_ascii_case("resx") {
            Ok(ResxFilter.into())
        } else if extension.eq_ignore_ascii_case("xml") {
            Ok(XmlFilter::new(options.translatable_elements.as_deref())?.into())
        } else {
            Ok(PlainFilter.into())
        }
    }
}

/// Decide whether `path` has anything to translate.
///
/// Files handled by [`PlainFilter`] are not read at all.
pub fn is_localizable(
    fs: &dyn FileSystem,
    path: &Path,
    options: &FormatOptions,
) -> Result<bool, SelectError> {
    let filter = FilterKind::for_file(path, options)?;
    if matches!(filter, FilterKind::Plain(_)) {
        return Ok(true);
    }

    let content = fs.read_to_string(path).map_err(|source| SelectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    filter
        .is_localizable(&content)
        .map_err(|source| SelectError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
