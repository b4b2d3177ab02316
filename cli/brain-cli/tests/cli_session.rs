// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Commands that talk to the backend, against a mock server

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use assert_cmd::Command;
use common::{brain_cmd, write_profile};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_session(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/auth/session/{}", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "factors": ["password", "yubikey"],
            "group_memberships": ["staff"],
        })))
        .mount(server)
        .await;
}

/// brain pointed at `server` with a saved token
fn cmd(server: &MockServer, config_dir: &std::path::Path) -> Command {
    let mut cmd = brain_cmd(config_dir);
    cmd.env("BRAIN_AUTH_URL", format!("{}/auth", server.uri()))
        .env("BRAIN_URL", format!("{}/brain", server.uri()))
        .env("BRAIN_TOKEN", "tok")
        .arg("--insecure");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    let dir = tempfile::tempdir().unwrap();

    let output = cmd(&server, dir.path()).arg("whoami").output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let identity: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(identity["username"], "alice");
    assert_eq!(identity["factors"], json!(["password", "yubikey"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_vm() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/brain/accounts/acme/groups/default/virtual_machines/web1"))
        .and(query_param("view", "overview"))
        .and(wiremock::matchers::header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "web1",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    cmd(&server, dir.path())
        .args(["show", "vm", "web1.default.acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"web1\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_vm_uses_default_account_and_group() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/brain/accounts/acme/groups/default/virtual_machines/web1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "web1"})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    cmd(&server, dir.path())
        .env("BRAIN_ACCOUNT", "acme")
        .args(["show", "vm", "web1"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_vm_with_purge() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("DELETE"))
        .and(path("/brain/accounts/acme/groups/db/virtual_machines/pg1"))
        .and(query_param("purge", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    cmd(&server, dir.path())
        .args(["delete", "vm", "pg1.db.acme", "--purge", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted virtual machine pg1.db.acme"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_is_reported() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/brain/accounts/acme/groups/default/virtual_machines/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such virtual machine"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    cmd(&server, dir.path())
        .args(["show", "vm", "ghost.default.acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such virtual machine"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plain_http_refused_without_insecure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    brain_cmd(dir.path())
        .env("BRAIN_AUTH_URL", format!("{}/auth", server.uri()))
        .env("BRAIN_TOKEN", "tok")
        .arg("whoami")
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_saved_profile_is_used() {
    let server = MockServer::start().await;
    mount_session(&server, "saved-tok").await;
    let dir = tempfile::tempdir().unwrap();
    write_profile(
        dir.path(),
        "lab",
        &json!({
            "name": "lab",
            "endpoints": { "auth": format!("{}/auth", server.uri()) },
            "insecure": true,
            "token": "saved-tok",
        }),
    );

    brain_cmd(dir.path())
        .args(["--profile", "lab", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flags_alone_need_no_profile() {
    let server = MockServer::start().await;
    mount_session(&server, "flag-tok").await;
    let dir = tempfile::tempdir().unwrap();

    brain_cmd(dir.path())
        .arg("--auth-url")
        .arg(format!("{}/auth", server.uri()))
        .args(["--token", "flag-tok", "--insecure", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}
