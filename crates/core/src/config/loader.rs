use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use tracing::debug;

use crate::config::types::{
    Config, ConfigFile, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, FileFormat, LoggingConfig,
    MIN_TIMEOUT_MS, OutputFormat, PartialConfig,
};

pub const ENV_ENDPOINT: &str = "SIYUAN_ENDPOINT";
pub const ENV_TOKEN: &str = "SIYUAN_TOKEN";
pub const ENV_TIMEOUT: &str = "SIYUAN_TIMEOUT";
pub const ENV_OUTPUT_FORMAT: &str = "SIYUAN_OUTPUT_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to write config file {0}: {1}")]
    WriteError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("failed to parse JSON in {0}: {1}")]
    JsonError(String, #[source] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("unknown config key '{0}' (expected one of: endpoint, token, timeout, output_format, plain)")]
    UnknownKey(String),

    #[error("invalid configuration:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with precedence CLI > environment > file > defaults.
    ///
    /// An explicit `config_path` must exist. Without one, the standard
    /// locations are searched and a missing file simply contributes nothing.
    pub fn load(
        cli: &PartialConfig,
        config_path: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let source = locate_config_file(config_path)?;
        let file = match &source {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };
        let env_layer = PartialConfig::from_env_vars(env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))?;

        let mut config = resolve(cli, &env_layer, &file.to_partial());
        config.logging = resolve_logging(&file.logging)?;
        config.source = source;

        debug!(
            endpoint = %config.endpoint,
            format = %config.output_format,
            source = ?config.source,
            "configuration resolved"
        );
        Ok(config)
    }
}

impl PartialConfig {
    /// Build the environment layer from `(name, value)` pairs.
    pub fn from_env_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_ENDPOINT => layer.endpoint = Some(value),
                ENV_TOKEN => layer.token = Some(value),
                ENV_TIMEOUT => {
                    let ms = value.trim().parse::<u64>().map_err(|e| {
                        ConfigError::InvalidValue { key: key.clone(), reason: e.to_string() }
                    })?;
                    layer.timeout_ms = Some(ms);
                }
                ENV_OUTPUT_FORMAT => {
                    let format = value
                        .parse::<OutputFormat>()
                        .map_err(|reason| ConfigError::InvalidValue { key: key.clone(), reason })?;
                    layer.output_format = Some(format);
                }
                _ => {}
            }
        }
        Ok(layer)
    }
}

/// Merge configuration layers, highest precedence first.
///
/// Empty strings and zero timeouts count as "not set" so a lower layer can
/// still supply the value. When `plain` is on, table output becomes JSON.
pub fn resolve(cli: &PartialConfig, env: &PartialConfig, file: &PartialConfig) -> Config {
    let defaults = PartialConfig::defaults();
    let layers = [cli, env, file, &defaults];

    let endpoint = first(&layers, |l| l.endpoint.clone().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let token = first(&layers, |l| l.token.clone().filter(|s| !s.is_empty()))
        .unwrap_or_default();
    let timeout_ms =
        first(&layers, |l| l.timeout_ms.filter(|t| *t > 0)).unwrap_or(DEFAULT_TIMEOUT_MS);
    let mut output_format = first(&layers, |l| l.output_format).unwrap_or_default();
    let plain = first(&layers, |l| l.plain).unwrap_or(false);

    if plain && output_format == OutputFormat::Table {
        output_format = OutputFormat::Json;
    }

    Config {
        endpoint: endpoint.trim_end_matches('/').to_string(),
        token,
        timeout_ms,
        output_format,
        plain,
        logging: LoggingConfig::default(),
        source: None,
    }
}

fn first<T>(layers: &[&PartialConfig], get: impl Fn(&PartialConfig) -> Option<T>) -> Option<T> {
    layers.iter().find_map(|layer| get(layer))
}

/// Check that a resolved configuration can talk to the API.
///
/// All problems are reported together.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.endpoint.trim().is_empty() {
        errors.push("endpoint is required".to_string());
    }

    if config.token.is_empty() {
        errors.push("API token is required. Provide it with one of:".to_string());
        errors.push("  1. command line: snmcli --token YOUR_TOKEN <command>".to_string());
        errors.push(format!("  2. environment: export {ENV_TOKEN}=YOUR_TOKEN"));
        errors.push("  3. config file: snmcli config set token YOUR_TOKEN".to_string());
        errors.push("  4. create a config file first with: snmcli config init".to_string());
    }

    if config.timeout_ms < MIN_TIMEOUT_MS {
        errors.push(format!("timeout must be at least {MIN_TIMEOUT_MS}ms"));
    }

    if errors.is_empty() { Ok(()) } else { Err(ConfigError::Invalid(errors)) }
}

/// Find the config file to read.
pub fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        let path = expand_path(&path.to_string_lossy())?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        return Ok(Some(path));
    }

    Ok(candidate_paths().into_iter().find(|p| p.is_file()))
}

/// Search order for config files when none is given explicitly.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(".snmclirc.json"),
        PathBuf::from(".snmclirc"),
        PathBuf::from("snmcli.config.json"),
        default_config_path(),
    ];
    if let Some(home) = home_dir() {
        paths.push(home.join(".snmclirc.json"));
        paths.push(home.join(".snmclirc"));
        paths.push(home.join(".config").join("snmcli.json"));
    }
    paths
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("snmcli").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("snmcli").join("config.toml")
}

pub fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let s = fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

    match FileFormat::from_path(path) {
        FileFormat::Toml => toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e)),
        FileFormat::Json => serde_json::from_str(&s)
            .map_err(|e| ConfigError::JsonError(path.display().to_string(), e)),
    }
}

fn resolve_logging(log_cfg: &LoggingConfig) -> Result<LoggingConfig, ConfigError> {
    let file = match &log_cfg.file {
        Some(file) => Some(expand_path(&file.to_string_lossy())?),
        None => None,
    };
    Ok(LoggingConfig { file, ..log_cfg.clone() })
}

pub(crate) fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(endpoint: Option<&str>, token: Option<&str>) -> PartialConfig {
        PartialConfig {
            endpoint: endpoint.map(str::to_string),
            token: token.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_apply_when_nothing_set() {
        let empty = PartialConfig::default();
        let cfg = resolve(&empty, &empty, &empty);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.token, "");
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.output_format, OutputFormat::Table);
        assert!(!cfg.plain);
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let cli = layer(Some("http://cli:1"), None);
        let env = layer(Some("http://env:2"), Some("env-token"));
        let file = layer(Some("http://file:3"), Some("file-token"));
        let cfg = resolve(&cli, &env, &file);
        assert_eq!(cfg.endpoint, "http://cli:1");
        assert_eq!(cfg.token, "env-token");
    }

    #[test]
    fn empty_strings_fall_through() {
        let cli = layer(Some(""), Some(""));
        let file = layer(None, Some("file-token"));
        let cfg = resolve(&cli, &PartialConfig::default(), &file);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.token, "file-token");
    }

    #[test]
    fn plain_switches_table_to_json() {
        let cli = PartialConfig { plain: Some(true), ..Default::default() };
        let cfg = resolve(&cli, &PartialConfig::default(), &PartialConfig::default());
        assert_eq!(cfg.output_format, OutputFormat::Json);

        let md = PartialConfig {
            plain: Some(true),
            output_format: Some(OutputFormat::Markdown),
            ..Default::default()
        };
        let cfg = resolve(&md, &PartialConfig::default(), &PartialConfig::default());
        assert_eq!(cfg.output_format, OutputFormat::Markdown);
    }

    #[test]
    fn trailing_slash_trimmed() {
        let cli = layer(Some("http://host:6806/"), None);
        let cfg = resolve(&cli, &PartialConfig::default(), &PartialConfig::default());
        assert_eq!(cfg.endpoint, "http://host:6806");
    }

    #[test]
    fn env_layer_parses_known_variables() {
        let vars = vec![
            (ENV_ENDPOINT.to_string(), "http://e".to_string()),
            (ENV_TIMEOUT.to_string(), "5000".to_string()),
            (ENV_OUTPUT_FORMAT.to_string(), "markdown".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ];
        let layer = PartialConfig::from_env_vars(vars).unwrap();
        assert_eq!(layer.endpoint.as_deref(), Some("http://e"));
        assert_eq!(layer.timeout_ms, Some(5000));
        assert_eq!(layer.output_format, Some(OutputFormat::Markdown));
        assert_eq!(layer.token, None);
    }

    #[test]
    fn env_layer_rejects_bad_timeout() {
        let vars = vec![(ENV_TIMEOUT.to_string(), "soon".to_string())];
        let err = PartialConfig::from_env_vars(vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_TIMEOUT));
    }

    #[test]
    fn validate_collects_all_problems() {
        let mut cfg = resolve(
            &PartialConfig::default(),
            &PartialConfig::default(),
            &PartialConfig::default(),
        );
        cfg.timeout_ms = 10;
        let ConfigError::Invalid(errors) = validate(&cfg).unwrap_err() else {
            panic!("expected Invalid");
        };
        assert!(errors[0].contains("token is required"));
        assert!(errors.last().unwrap().contains("at least 1000ms"));
    }

    #[test]
    fn validate_accepts_complete_config() {
        let cli = layer(None, Some("secret-token"));
        let cfg = resolve(&cli, &PartialConfig::default(), &PartialConfig::default());
        assert!(validate(&cfg).is_ok());
    }
}
