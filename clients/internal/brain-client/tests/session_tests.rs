// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Session lifecycle against a mock auth service.

mod common;

use brain_client::{Client, Credentials, Error};
use common::{TOKEN, authenticated_client, config, mount_session};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials::from([
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ])
}

#[tokio::test]
async fn credentials_create_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .and(body_json(json!({"username": "alice", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("new-token\n"))
        .expect(1)
        .mount(&server)
        .await;
    mount_session(&server, "new-token", "alice").await;

    let client = Client::new(config(&server)).unwrap();
    client
        .authenticate_with_credentials(&credentials("alice", "hunter2"))
        .await
        .unwrap();

    let session = client.session().unwrap();
    assert_eq!(session.token, "new-token");
    assert_eq!(session.username, "alice");
    assert_eq!(client.auth_factors(), vec!["password".to_string()]);
    assert_eq!(client.auth_group_memberships(), vec!["staff".to_string()]);
}

#[tokio::test]
async fn failed_login_keeps_previous_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad login credentials"))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, config(&server)).await;
    let err = client
        .authenticate_with_credentials(&credentials("alice", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotAuthorized(_)));
    assert_eq!(client.auth_token(), TOKEN);
    assert_eq!(client.auth_username(), "alice");
}

#[tokio::test]
async fn unknown_token_leaves_client_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/session/stale"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).unwrap();
    let err = client.authenticate_with_token("stale").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn empty_token_is_rejected_without_io() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).unwrap();
    assert!(matches!(
        client.authenticate_with_token("").await,
        Err(Error::EmptyToken)
    ));
}

#[tokio::test]
async fn impersonation_replaces_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .and(body_json(json!({"token": TOKEN, "impersonate": "bob"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("bob-token"))
        .expect(1)
        .mount(&server)
        .await;
    mount_session(&server, "bob-token", "bob").await;

    let client = authenticated_client(&server, config(&server)).await;
    client.impersonate("bob").await.unwrap();
    assert_eq!(client.auth_username(), "bob");
    assert_eq!(client.auth_token(), "bob-token");
}

#[tokio::test]
async fn refused_impersonation_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, config(&server)).await;
    let err = client.impersonate("root").await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    assert_eq!(client.auth_username(), "alice");
}

#[tokio::test]
async fn failed_login_error_drops_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad login credentials"))
        .mount(&server)
        .await;

    let client = Client::new(config(&server)).unwrap();
    let err = client
        .authenticate_with_credentials(&credentials("alice", "hunter2"))
        .await
        .unwrap_err();

    let api = err.api().expect("http error");
    assert_eq!(api.request_body, "");
    assert_eq!(api.response_body, "Bad login credentials");
    assert!(!format!("{:?}", err).contains("hunter2"));
}
