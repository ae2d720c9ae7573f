use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::Command;
use std::thread::{self, JoinHandle};
use tempfile::tempdir;

/// Answer every request with `reply` until `count` requests were served.
/// Returns the endpoint and the request paths seen.
fn fake_kernel(count: usize, reply: Value) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut paths = Vec::new();
        for _ in 0..count {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            paths.push(request_line.split_whitespace().nth(1).unwrap_or_default().to_string());

            let mut content_length = 0;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end().to_ascii_lowercase();
                if line.is_empty() {
                    break;
                }
                if let Some(v) = line.strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                if line.starts_with("transfer-encoding:") && line.contains("chunked") {
                    chunked = true;
                }
            }
            if chunked {
                loop {
                    let mut size = String::new();
                    reader.read_line(&mut size).unwrap();
                    let size = usize::from_str_radix(size.trim(), 16).unwrap();
                    let mut skip = vec![0; size + 2];
                    reader.read_exact(&mut skip).unwrap();
                    if size == 0 {
                        break;
                    }
                }
            } else {
                let mut body = vec![0; content_length];
                reader.read_exact(&mut body).unwrap();
            }

            let payload = reply.to_string();
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                payload.len()
            )
            .unwrap();
        }
        paths
    });

    (format!("http://{addr}"), handle)
}

fn snmcli(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("snmcli"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("SIYUAN_ENDPOINT")
        .env_remove("SIYUAN_TOKEN")
        .env_remove("SIYUAN_TIMEOUT")
        .env_remove("SIYUAN_OUTPUT_FORMAT");
    cmd
}

#[test]
fn notebook_list_as_json() {
    let tmp = tempdir().unwrap();
    let (url, server) = fake_kernel(
        1,
        json!({"code": 0, "msg": "", "data": {"notebooks": [
            {"id": "20240101000000-nb00001", "name": "Inbox", "icon": "", "sort": 0, "closed": false}
        ]}}),
    );

    snmcli(tmp.path())
        .args(["--endpoint", &url, "--token", "secret", "-f", "json", "notebook", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Inbox\""));

    assert_eq!(server.join().unwrap(), vec!["/api/notebook/lsNotebooks"]);
}

#[test]
fn notebook_list_as_table_uses_env_layer() {
    let tmp = tempdir().unwrap();
    let (url, server) = fake_kernel(
        1,
        json!({"code": 0, "msg": "", "data": {"notebooks": [
            {"id": "20240101000000-nb00001", "name": "Inbox"}
        ]}}),
    );

    snmcli(tmp.path())
        .env("SIYUAN_ENDPOINT", &url)
        .env("SIYUAN_TOKEN", "secret")
        .args(["notebook", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("Inbox"));

    server.join().unwrap();
}

#[test]
fn query_prints_markdown_table() {
    let tmp = tempdir().unwrap();
    let (url, server) = fake_kernel(
        1,
        json!({"code": 0, "msg": "", "data": [{"id": "b1", "content": "hello"}]}),
    );

    snmcli(tmp.path())
        .args(["-e", &url, "-t", "secret", "-f", "markdown", "query", "SELECT * FROM blocks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| content | id |"))
        .stdout(predicate::str::contains("| hello   | b1 |"));

    assert_eq!(server.join().unwrap(), vec!["/api/query/sql"]);
}

#[test]
fn api_error_code_exits_nonzero() {
    let tmp = tempdir().unwrap();
    let (url, server) = fake_kernel(1, json!({"code": -1, "msg": "no such block", "data": null}));

    snmcli(tmp.path())
        .args(["-e", &url, "-t", "secret", "block", "delete", "20240101000000-zzzzzzz"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to delete block"))
        .stderr(predicate::str::contains("no such block"));

    server.join().unwrap();
}

#[test]
fn doctor_reports_kernel_version() {
    let tmp = tempdir().unwrap();
    let (url, server) = fake_kernel(1, json!({"code": 0, "msg": "", "data": "3.1.0"}));

    snmcli(tmp.path())
        .args(["-e", &url, "-t", "abcd1234efgh5678", "doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!("snmcli:   ", env!("CARGO_PKG_VERSION"))))
        .stdout(predicate::str::contains("token:    abcd****5678"))
        .stdout(predicate::str::contains("kernel:   3.1.0"))
        .stdout(predicate::str::contains("OK   snmcli doctor"));

    assert_eq!(server.join().unwrap(), vec!["/api/system/version"]);
}

#[test]
fn doctor_without_token_fails() {
    let tmp = tempdir().unwrap();
    snmcli(tmp.path())
        .arg("doctor")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FAIL snmcli doctor"))
        .stdout(predicate::str::contains("API token is required"));
}

#[test]
fn commands_without_token_fail_before_connecting() {
    let tmp = tempdir().unwrap();
    snmcli(tmp.path())
        .args(["notebook", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("API token is required"))
        .stderr(predicate::str::contains("snmcli config init"));
}

#[test]
fn completions_for_bash() {
    let tmp = tempdir().unwrap();
    snmcli(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snmcli"))
        .stdout(predicate::str::contains("export-md"));
}
