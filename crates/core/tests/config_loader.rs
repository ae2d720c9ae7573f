use snmcli_core::config::loader::{ConfigError, ConfigLoader, read_config_file, resolve};
use snmcli_core::config::{OutputFormat, PartialConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn cli(endpoint: &str, token: &str) -> PartialConfig {
    PartialConfig {
        endpoint: Some(endpoint.to_string()),
        token: Some(token.to_string()),
        ..Default::default()
    }
}

#[test]
fn toml_file_layer_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("snmcli/config.toml");
    let toml = r#"
endpoint = "http://10.0.0.2:6806/"
token = "file-token"
timeout = 5000
output_format = "markdown"

[logging]
level = "info"
file = "/tmp/snmcli.log"
"#;
    write_file(&cfg_path, toml);

    let file = read_config_file(&cfg_path).expect("should parse");
    let empty = PartialConfig::default();
    let cfg = resolve(&empty, &empty, &file.to_partial());

    assert_eq!(cfg.endpoint, "http://10.0.0.2:6806");
    assert_eq!(cfg.token, "file-token");
    assert_eq!(cfg.timeout_ms, 5000);
    assert_eq!(cfg.output_format, OutputFormat::Markdown);
    assert_eq!(file.logging.level, "info");
    assert_eq!(file.logging.file, Some(PathBuf::from("/tmp/snmcli.log")));
}

#[test]
fn json_file_accepts_camel_case_format() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join(".snmclirc.json");
    write_file(&cfg_path, r#"{"token": "abc", "outputFormat": "json", "plain": true}"#);

    let file = read_config_file(&cfg_path).expect("should parse");
    assert_eq!(file.output_format, Some(OutputFormat::Json));
    assert_eq!(file.plain, Some(true));
    assert_eq!(file.logging.level, "warn");
}

#[test]
fn extensionless_rc_file_is_json() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join(".snmclirc");
    write_file(&cfg_path, r#"{"endpoint": "http://localhost:7000"}"#);

    let file = read_config_file(&cfg_path).expect("should parse");
    assert_eq!(file.endpoint.as_deref(), Some("http://localhost:7000"));
}

#[test]
fn cli_overrides_file_and_records_source() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "endpoint = \"http://file:1\"\ntoken = \"file-token\"\n");

    let cfg = ConfigLoader::load(&cli("http://cli:2", "cli-token"), Some(cfg_path.as_path()))
        .expect("should load");
    assert_eq!(cfg.endpoint, "http://cli:2");
    assert_eq!(cfg.token, "cli-token");
    assert_eq!(cfg.source.as_deref(), Some(cfg_path.as_path()));
}

#[test]
fn missing_explicit_file_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("nope/config.toml");
    let err = ConfigLoader::load(&PartialConfig::default(), Some(cfg_path.as_path())).unwrap_err();
    match err {
        ConfigError::NotFound(_) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn malformed_toml_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "endpoint = [unterminated\n");

    let err = read_config_file(&cfg_path).unwrap_err();
    match err {
        ConfigError::ParseError(path, _) => assert!(path.ends_with("config.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn malformed_json_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("snmcli.config.json");
    write_file(&cfg_path, "{ not json");

    let err = read_config_file(&cfg_path).unwrap_err();
    assert!(matches!(err, ConfigError::JsonError(_, _)), "got {err:?}");
}

#[test]
fn unknown_output_format_in_file_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "output_format = \"yaml\"\n");

    assert!(read_config_file(&cfg_path).is_err());
}
