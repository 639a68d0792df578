use roxmltree::{Document, ParsingOptions};

use super::{ContentFilter, query::Query};
use crate::files::SelectError;

/// Generic XML, checked against the configured translatable elements.
///
/// Each query is one group; a group's `|` alternatives act as fallbacks for
/// each other. The document is localizable when any group finds visible text.
#[derive(Debug, Clone, Default)]
pub struct XmlFilter {
    groups: Option<Vec<Query>>,
}

impl XmlFilter {
    pub fn new(translatable_elements: Option<&[String]>) -> Result<Self, SelectError> {
        let groups = translatable_elements
            .map(|elements| {
                elements
                    .iter()
                    .map(|e| Query::parse(e))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(Self { groups })
    }
}

impl ContentFilter for XmlFilter {
    fn is_localizable(&self, content: &str) -> Result<bool, roxmltree::Error> {
        let groups = match &self.groups {
            Some(groups) if !groups.is_empty() => groups,
            _ => return Ok(true),
        };

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(content, options)?;

        Ok(groups.iter().any(|group| group.matches(&doc)))
    }
}
