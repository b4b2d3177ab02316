// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Login loop against a mock auth service

#![allow(clippy::expect_used, clippy::unwrap_used)]

use brain_auth_session::{
    BoxError, CredentialSource, Login, LoginCredentials, LoginError, LoginState, MAX_ATTEMPTS,
    TokenStore,
};
use brain_client::{Client, ClientConfig, Endpoint, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Hands out the same credentials every time and remembers what it was told.
#[derive(Default)]
struct ScriptedSource {
    prompts: usize,
    previous_errors: Vec<Option<String>>,
    fail: bool,
}

impl CredentialSource for ScriptedSource {
    fn credentials(
        &mut self,
        previous: Option<&brain_client::Error>,
    ) -> Result<LoginCredentials, BoxError> {
        self.prompts += 1;
        self.previous_errors.push(previous.map(|e| e.to_string()));
        if self.fail {
            return Err("terminal closed".into());
        }
        Ok(LoginCredentials::new("alice", "hunter2"))
    }
}

#[derive(Default)]
struct MemoryStore {
    tokens: Vec<String>,
    fail: bool,
}

impl TokenStore for MemoryStore {
    fn store_token(&mut self, token: &str) -> Result<(), BoxError> {
        if self.fail {
            return Err("read-only filesystem".into());
        }
        self.tokens.push(token.to_string());
        Ok(())
    }
}

fn client(server: &MockServer) -> Client {
    Client::new(
        ClientConfig::default()
            .with_endpoint(Endpoint::Auth, format!("{}/auth", server.uri()))
            .allow_insecure(true),
    )
    .unwrap()
}

async fn mount_session_lookup(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/auth/session/{}", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "factors": ["password"],
            "group_memberships": [],
        })))
        .mount(server)
        .await;
}

async fn mount_login_success(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_string(token))
        .mount(server)
        .await;
    mount_session_lookup(server, token).await;
}

#[tokio::test]
async fn test_stored_token_skips_prompt() {
    let server = MockServer::start().await;
    mount_session_lookup(&server, "stored").await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    login
        .run(Some("stored"), &mut source, &mut store)
        .await
        .unwrap();

    assert_eq!(login.state(), Some(LoginState::Authenticated));
    assert_eq!(login.attempts(), 0);
    assert_eq!(source.prompts, 0);
    assert!(store.tokens.is_empty());
    assert_eq!(client.auth_token(), "stored");
}

#[tokio::test]
async fn test_rejected_token_falls_back_to_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/session/stale"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_login_success(&server, "fresh").await;

    let client = client(&server);
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    login
        .run(Some("stale"), &mut source, &mut store)
        .await
        .unwrap();

    assert_eq!(source.prompts, 1);
    assert_eq!(source.previous_errors, vec![None]);
    assert_eq!(store.tokens, vec!["fresh".to_string()]);
    assert_eq!(
        login.trace(),
        &[
            LoginState::Authenticating,
            LoginState::NeedCredentials,
            LoginState::Authenticating,
            LoginState::Authenticated,
        ]
    );
}

#[tokio::test]
async fn test_succeeds_on_third_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad login credentials"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_login_success(&server, "third-time").await;

    let client = client(&server);
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    login.run(None, &mut source, &mut store).await.unwrap();

    assert_eq!(login.attempts(), MAX_ATTEMPTS);
    assert_eq!(source.prompts, 3);
    assert!(source.previous_errors[0].is_none());
    assert!(
        source.previous_errors[1]
            .as_deref()
            .unwrap()
            .contains("Bad login credentials")
    );
    assert_eq!(client.auth_token(), "third-time");
    assert_eq!(store.tokens, vec!["third-time".to_string()]);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Badly-formed parameters"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    let err = login.run(None, &mut source, &mut store).await.unwrap_err();

    assert_eq!(login.state(), Some(LoginState::Failed));
    assert_eq!(login.attempts(), 3);
    let err = err.client_error().expect("client error");
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert!(!client.is_authenticated());
    assert!(store.tokens.is_empty());
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    let err = login.run(None, &mut source, &mut store).await.unwrap_err();

    assert_eq!(login.attempts(), 1);
    assert_eq!(
        err.client_error().and_then(|e| e.status()),
        Some(StatusCode::INTERNAL_SERVER_ERROR)
    );
}

#[tokio::test]
async fn test_transport_error_on_token_fails_without_prompt() {
    // Nothing listens on port 1.
    let client = Client::new(
        ClientConfig::default()
            .with_endpoint(Endpoint::Auth, "http://127.0.0.1:1")
            .allow_insecure(true),
    )
    .unwrap();
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    let err = login
        .run(Some("stored"), &mut source, &mut store)
        .await
        .unwrap_err();

    assert!(err.client_error().unwrap().is_transport());
    assert_eq!(source.prompts, 0);
    assert_eq!(login.state(), Some(LoginState::Failed));
}

#[tokio::test]
async fn test_credential_source_failure() {
    let server = MockServer::start().await;
    let client = client(&server);
    let mut source = ScriptedSource {
        fail: true,
        ..Default::default()
    };
    let mut store = MemoryStore::default();
    let mut login = Login::new(&client);
    let err = login.run(None, &mut source, &mut store).await.unwrap_err();

    assert!(matches!(err, LoginError::CredentialSource(_)));
    assert_eq!(login.attempts(), 0);
    assert_eq!(login.state(), Some(LoginState::Failed));
}

#[tokio::test]
async fn test_token_store_failure_is_not_fatal() {
    let server = MockServer::start().await;
    mount_login_success(&server, "fresh").await;

    let client = client(&server);
    let mut source = ScriptedSource::default();
    let mut store = MemoryStore {
        fail: true,
        ..Default::default()
    };
    let mut login = Login::new(&client);
    login.run(None, &mut source, &mut store).await.unwrap();

    assert!(client.is_authenticated());
    assert_eq!(login.state(), Some(LoginState::Authenticated));
}
