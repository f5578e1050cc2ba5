use std::path::PathBuf;

use chrono::FixedOffset;
use serde::Deserialize;

use crate::frontmatter::{Mode, ParseOptions, StringifyOptions, local_offset};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// `local`, `utc`, or an offset such as `+08:00`.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub stringify: StringifyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for writing front matter.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct StringifyConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub prefix_separator: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File the settings came from; `None` when built-in defaults are used.
    pub source: Option<PathBuf>,
    pub timezone: FixedOffset,
    pub stringify: StringifyConfig,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::with_timezone(self.timezone)
    }

    pub fn stringify_options(&self) -> StringifyOptions {
        StringifyOptions {
            mode: self.stringify.mode,
            separator: self.stringify.separator.clone(),
            prefix_separator: self.stringify.prefix_separator,
            timezone: self.timezone,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            timezone: local_offset(),
            stringify: StringifyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
