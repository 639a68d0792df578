use roxmltree::{Document, Node, ParsingOptions};

use super::{ContentFilter, query::has_visible_text};

/// Dotted (component property) names that still hold user-visible text.
const LOCALIZABLE_PROPERTY_SUFFIXES: &[&str] = &[".Text", ".AccessibleName", ".AccessibleDescription"];

/// .NET resource files: `<root>` holding `<data name="..."><value>...</value></data>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResxFilter;

impl ContentFilter for ResxFilter {
    fn is_localizable(&self, content: &str) -> Result<bool, roxmltree::Error> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(content, options)?;

        Ok(doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("data"))
            .any(is_localizable_entry))
    }
}

/// Whitespace-only values are never shown to translators, so they don't count.
fn is_localizable_entry(data: Node) -> bool {
    let Some(name) = data.attribute("name").filter(|n| !n.is_empty()) else {
        return false;
    };

    if name.contains('.')
        && !LOCALIZABLE_PROPERTY_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
    {
        return false;
    }

    data.children()
        .find(|n| n.has_tag_name("value"))
        .is_some_and(has_visible_text)
}
