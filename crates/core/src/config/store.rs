//! Reading and editing config files for the `config` subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::config::loader::ConfigError;
use crate::config::types::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, FileFormat, OutputFormat};

/// Keys accepted by [`set_value`], in canonical (snake_case) form.
pub const KNOWN_KEYS: &[&str] = &["endpoint", "token", "timeout", "output_format", "plain"];

/// Outcome of [`init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Write a default config file unless one already exists at `path`.
pub fn init(path: &Path) -> Result<InitOutcome, ConfigError> {
    if path.exists() {
        return Ok(InitOutcome::AlreadyExists(path.to_path_buf()));
    }

    let mut doc = Map::new();
    doc.insert("endpoint".into(), Value::from(DEFAULT_ENDPOINT));
    doc.insert("timeout".into(), Value::from(DEFAULT_TIMEOUT_MS));
    doc.insert(
        key_for_format("output_format", FileFormat::from_path(path)).into(),
        Value::from(OutputFormat::Table.as_str()),
    );

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| ConfigError::WriteError(parent.display().to_string(), e))?;
    }
    write_document(path, &doc)?;
    info!(path = %path.display(), "created config file");
    Ok(InitOutcome::Created(path.to_path_buf()))
}

/// Set one key in an existing config file, keeping all other entries.
///
/// Values are checked and stored with their natural type: `timeout` as an
/// integer, `plain` as a boolean, `output_format` as a known format name.
pub fn set_value(path: &Path, key: &str, raw: &str) -> Result<(), ConfigError> {
    let canonical = canonical_key(key)?;
    let value = typed_value(canonical, raw)?;

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let format = FileFormat::from_path(path);
    let mut doc = match read_document(path)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if canonical == "output_format" {
        doc.remove("output_format");
        doc.remove("outputFormat");
    }
    doc.insert(key_for_format(canonical, format).to_string(), value);
    write_document(path, &doc)?;
    info!(path = %path.display(), key = canonical, "updated config file");
    Ok(())
}

/// Read a config file as a generic JSON value (TOML is converted).
pub fn read_document(path: &Path) -> Result<Value, ConfigError> {
    let s = fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;
    match FileFormat::from_path(path) {
        FileFormat::Toml => {
            toml::from_str(&s).map_err(|e| ConfigError::ParseError(path.display().to_string(), e))
        }
        FileFormat::Json => serde_json::from_str(&s)
            .map_err(|e| ConfigError::JsonError(path.display().to_string(), e)),
    }
}

fn write_document(path: &Path, doc: &Map<String, Value>) -> Result<(), ConfigError> {
    let text = match FileFormat::from_path(path) {
        FileFormat::Toml => toml::to_string_pretty(doc)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
        FileFormat::Json => {
            let mut s = serde_json::to_string_pretty(doc)
                .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
            s.push('\n');
            s
        }
    };
    fs::write(path, text).map_err(|e| ConfigError::WriteError(path.display().to_string(), e))
}

fn canonical_key(key: &str) -> Result<&'static str, ConfigError> {
    let normalized = match key {
        "outputFormat" | "output-format" | "format" => "output_format",
        other => other,
    };
    KNOWN_KEYS
        .iter()
        .copied()
        .find(|k| *k == normalized)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
}

/// JSON files keep the camelCase spelling used by `.snmclirc.json`.
fn key_for_format(canonical: &'static str, format: FileFormat) -> &'static str {
    match (canonical, format) {
        ("output_format", FileFormat::Json) => "outputFormat",
        (key, _) => key,
    }
}

fn typed_value(key: &str, raw: &str) -> Result<Value, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue { key: key.to_string(), reason };
    match key {
        "timeout" => raw.trim().parse::<u64>().map(Value::from).map_err(|e| invalid(e.to_string())),
        "plain" => raw.trim().parse::<bool>().map(Value::from).map_err(|e| invalid(e.to_string())),
        "output_format" => raw
            .parse::<OutputFormat>()
            .map(|f| Value::from(f.as_str()))
            .map_err(invalid),
        _ => Ok(Value::from(raw)),
    }
}
