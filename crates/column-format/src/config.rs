//! Preview configuration, read from TOML.
//!
//! ```toml
//! template = "Progress Bar"
//! now_millis = 1767225600000
//! indent = "\t"
//! output = "json"
//! profiles = "my-profiles.json"
//! ```

use crate::error::FormatError;
use crate::templates::{builtin_templates, load_profiles, Template};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Profile to preview with; the first one when unset.
    pub template: Option<String>,
    /// Fixed `@now`; the system clock when unset.
    pub now_millis: Option<i64>,
    /// Indentation of HTML output.
    pub indent: String,
    pub output: OutputFormat,
    /// JSON file with extra profiles, appended to the built-in ones.
    pub profiles: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            template: None,
            now_millis: None,
            indent: "  ".to_owned(),
            output: OutputFormat::Html,
            profiles: None,
        }
    }
}

impl PreviewConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, FormatError> {
        toml::from_str(text).map_err(|e| FormatError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let text = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Built-in profiles followed by the configured extra ones.
    pub fn templates(&self) -> Result<Vec<Template>, FormatError> {
        let mut templates = builtin_templates();
        if let Some(path) = &self.profiles {
            templates.extend(load_profiles(path)?);
        }
        Ok(templates)
    }

    /// `@now` for this run.
    pub fn now_millis(&self) -> i64 {
        self.now_millis
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
    }
}
