//! End-to-end runs of the `foundation` binary against the mock server.

use std::net::SocketAddr;

use assert_cmd::Command;
use mock_server::{Fixture, StatusCode};
use predicates::prelude::*;
use serde_json::json;

const KEY: &str = "cli-key";

fn spawn_server(fixture: Fixture) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, fixture).await
        })
        .unwrap();
    });

    addr
}

fn foundation(addr: SocketAddr) -> Command {
    let mut cmd = Command::cargo_bin("foundation").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("FOUNDATION_API_URL", format!("http://{addr}"))
        .env("FOUNDATION_API_KEY", KEY);
    cmd
}

#[test]
fn environment_prints_one_line_per_variable() {
    let addr = spawn_server(
        Fixture::new(KEY)
            .env("REGION", json!("us-east-1"))
            .env("DEBUG", json!(true)),
    );

    foundation(addr)
        .arg("env")
        .assert()
        .success()
        .stdout("DEBUG=true\nREGION=us-east-1\n");
}

#[test]
fn configuration_prints_indented_json() {
    let addr = spawn_server(Fixture::new(KEY).configuration(r#"{"a":1}"#, "application/json"));

    foundation(addr)
        .arg("configuration")
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");
}

#[test]
fn variable_with_uid_prints_override() {
    let addr = spawn_server(
        Fixture::new(KEY)
            .variable("theme", json!({"mode": "light"}))
            .override_for("user-42", "theme", json!({"mode": "dark", "size": 12})),
    );

    foundation(addr)
        .args(["variable", "--name", "theme", "--uid", "user-42"])
        .assert()
        .success()
        .stdout("{\n  \"mode\": \"dark\",\n  \"size\": 12\n}\n");
}

#[test]
fn api_key_flag_overrides_environment() {
    let addr = spawn_server(Fixture::new("flag-key").variable("color", json!("blue")));

    foundation(addr)
        .args(["--key", "flag-key", "variable", "-n", "color"])
        .assert()
        .success()
        .stdout("blue\n");
}

#[test]
fn server_error_exits_non_zero_with_one_diagnostic() {
    let addr = spawn_server(Fixture::new(KEY).failing(StatusCode::INTERNAL_SERVER_ERROR, "internal error"));

    foundation(addr)
        .arg("config")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "configuration command failed: request failed with HTTP 500: internal error",
        ));
}

#[test]
fn missing_api_key_is_a_usage_error() {
    Command::cargo_bin("foundation")
        .unwrap()
        .env_remove("FOUNDATION_API_KEY")
        .arg("env")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--api-key"));
}

#[test]
fn diagnostic_is_printed_whatever_the_log_filter() {
    let addr = spawn_server(Fixture::new(KEY).failing(StatusCode::INTERNAL_SERVER_ERROR, "internal error"));

    for filter in ["foundation_core=debug", "off"] {
        foundation(addr)
            .env("RUST_LOG", filter)
            .arg("config")
            .assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains(
                "configuration command failed: request failed with HTTP 500: internal error",
            ));
    }
}

#[test]
fn non_object_json_configuration_fails() {
    let addr = spawn_server(Fixture::new(KEY).configuration("[1,2]", "application/json"));

    foundation(addr)
        .arg("config")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "configuration command failed: decode failed: configuration content is not a JSON object",
        ));
}
