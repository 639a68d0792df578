use serde::Serialize;

/// Format hints that apply to a whole file collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatOptions {
    /// Explicit file type, e.g. `xml`. Overrides detection by extension.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// XPath-like queries selecting the translatable parts of XML files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translatable_elements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_attributes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_segmentation: Option<bool>,
}

impl FormatOptions {
    pub fn is_xml_type(&self) -> bool {
        self.file_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("xml"))
    }
}
