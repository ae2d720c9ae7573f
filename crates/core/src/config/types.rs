use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:6806";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Console rendering for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("must be one of: table, json, markdown (got '{other}')")),
        }
    }
}

/// One configuration layer. `None` means "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_ms: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub plain: Option<bool>,
}

impl PartialConfig {
    /// The built-in defaults layer.
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            token: Some(String::new()),
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            output_format: Some(OutputFormat::Table),
            plain: Some(false),
        }
    }
}

/// On-disk configuration file (TOML or JSON).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout: Option<u64>,
    #[serde(alias = "outputFormat")]
    pub output_format: Option<OutputFormat>,
    pub plain: Option<bool>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigFile {
    pub fn to_partial(&self) -> PartialConfig {
        PartialConfig {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            timeout_ms: self.timeout,
            output_format: self.output_format,
            plain: self.plain,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
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
    "warn".to_string()
}

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// `.toml` files are TOML; everything else (including `.snmclirc`) is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub token: String,
    pub timeout_ms: u64,
    pub output_format: OutputFormat,
    pub plain: bool,
    pub logging: LoggingConfig,
    /// File the file layer was read from, if any.
    pub source: Option<PathBuf>,
}

impl Config {
    /// Token shortened for display.
    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }
}

/// Mask all but the first and last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_short_and_long_tokens() {
        assert_eq!(mask_token(""), "****");
        assert_eq!(mask_token("12345678"), "****");
        assert_eq!(mask_token("abcd1234efgh"), "abcd****efgh");
    }

    #[test]
    fn format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn file_format_by_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a/config.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new(".snmclirc")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("x.json")), FileFormat::Json);
    }
}
