use snmcli_core::config::ConfigError;
use snmcli_core::config::loader::read_config_file;
use snmcli_core::config::store::{InitOutcome, init, read_document, set_value};
use snmcli_core::config::OutputFormat;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn init_writes_defaults_once() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("snmcli/config.toml");

    assert_eq!(init(&path).unwrap(), InitOutcome::Created(path.clone()));
    assert_eq!(init(&path).unwrap(), InitOutcome::AlreadyExists(path.clone()));

    let doc = read_document(&path).unwrap();
    assert_eq!(doc["endpoint"], json!("http://127.0.0.1:6806"));
    assert_eq!(doc["timeout"], json!(10000));
    assert_eq!(doc["output_format"], json!("table"));
}

#[test]
fn init_json_uses_camel_case() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(".snmclirc.json");
    init(&path).unwrap();

    let doc = read_document(&path).unwrap();
    assert_eq!(doc["outputFormat"], json!("table"));
    assert!(doc.get("output_format").is_none());
}

#[test]
fn set_keeps_other_keys_and_types_values() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    init(&path).unwrap();

    set_value(&path, "token", "secret-token").unwrap();
    set_value(&path, "timeout", "2500").unwrap();
    set_value(&path, "plain", "true").unwrap();
    set_value(&path, "format", "md").unwrap();

    let file = read_config_file(&path).unwrap();
    assert_eq!(file.token.as_deref(), Some("secret-token"));
    assert_eq!(file.timeout, Some(2500));
    assert_eq!(file.plain, Some(true));
    assert_eq!(file.output_format, Some(OutputFormat::Markdown));
    assert_eq!(file.endpoint.as_deref(), Some("http://127.0.0.1:6806"));
}

#[test]
fn set_replaces_either_format_spelling() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join(".snmclirc.json");
    std::fs::write(&path, r#"{"output_format": "table"}"#).unwrap();

    set_value(&path, "output_format", "json").unwrap();

    let doc = read_document(&path).unwrap();
    assert_eq!(doc, json!({"outputFormat": "json"}));
}

#[test]
fn set_rejects_unknown_key() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    init(&path).unwrap();

    let err = set_value(&path, "colour", "blue").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey(ref k) if k == "colour"), "got {err:?}");
}

#[test]
fn set_rejects_bad_values() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.toml");
    init(&path).unwrap();

    for (key, value) in [("timeout", "soon"), ("plain", "maybe"), ("output_format", "xml")] {
        let err = set_value(&path, key, value).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{key}: got {err:?}");
    }
}

#[test]
fn set_requires_existing_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("missing.toml");
    let err = set_value(&path, "token", "x").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)), "got {err:?}");
}
