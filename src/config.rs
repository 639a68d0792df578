use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Ok, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::files::{FormatOptions, filters::query::Query};

pub const CONFIG_FILE_NAME: &str = "l10nsync.json";

/// Placeholders an export pattern may use.
pub const EXPORT_PLACEHOLDERS: &[&str] = &[
    "language",
    "two_letters_code",
    "three_letters_code",
    "locale",
    "locale_with_underscore",
    "android_code",
    "osx_code",
    "osx_locale",
    "original_file_name",
    "original_path",
    "file_name",
    "file_extension",
];

/// Placeholders that make an export pattern differ per target language.
pub const LANGUAGE_PLACEHOLDERS: &[&str] = &[
    "language",
    "two_letters_code",
    "three_letters_code",
    "locale",
    "locale_with_underscore",
    "android_code",
    "osx_code",
    "osx_locale",
];

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([A-Za-z_]+)%").unwrap());

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub files: Vec<SourcePattern>,
}

/// One entry of the `files` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourcePattern {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translatable_elements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_content: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_attributes: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_segmentation: Option<u8>,
}

impl SourcePattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            file_type: self.file_type.clone(),
            translatable_elements: self.translatable_elements.clone(),
            translate_content: self.translate_content.map(|v| v == 1),
            translate_attributes: self.translate_attributes.map(|v| v == 1),
            content_segmentation: self.content_segmentation.map(|v| v == 1),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            bail!("'source' must not be empty");
        }

        for (name, value) in [
            ("translate_content", self.translate_content),
            ("translate_attributes", self.translate_attributes),
            ("content_segmentation", self.content_segmentation),
        ] {
            if let Some(value) = value
                && value > 1
            {
                bail!("'{}' must be 0 or 1, got {}", name, value);
            }
        }

        if let Some(translation) = &self.translation {
            validate_export_pattern(translation)?;
        }

        for element in self.translatable_elements.iter().flatten() {
            Query::parse(element)?;
        }

        Ok(())
    }
}

fn validate_export_pattern(pattern: &str) -> Result<()> {
    let placeholders: Vec<&str> = PLACEHOLDER_REGEX
        .captures_iter(pattern)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect();

    if let Some(unknown) = placeholders
        .iter()
        .find(|p| !EXPORT_PLACEHOLDERS.contains(p))
    {
        bail!(
            "Unknown placeholder '%{}%' in translation \"{}\"",
            unknown,
            pattern
        );
    }

    if !placeholders
        .iter()
        .any(|p| LANGUAGE_PLACEHOLDERS.contains(p))
    {
        bail!(
            "Translation \"{}\" must contain a language placeholder such as %two_letters_code%",
            pattern
        );
    }

    Ok(())
}

fn default_base_path() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            files: vec![SourcePattern {
                translation: Some(
                    "/%original_path%/%file_name%.%two_letters_code%.%file_extension%"
                        .to_string(),
                ),
                ..SourcePattern::new("/**/*.resx")
            }],
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending `files` entry.
    pub fn validate(&self) -> Result<()> {
        if self.base_path.trim().is_empty() {
            bail!("'base_path' must not be empty");
        }
        if self.files.is_empty() {
            bail!("No source patterns configured: 'files' is empty");
        }

        for (idx, pattern) in self.files.iter().enumerate() {
            pattern.validate().with_context(|| {
                format!("Invalid entry files[{}] (\"{}\")", idx, pattern.source)
            })?;
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from; `None` if using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => Ok(ConfigLoadResult {
            config: load_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
