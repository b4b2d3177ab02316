// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Shared helpers for brain-client integration tests
//!
//! Every backend is played by one wiremock server, with each endpoint's base
//! URL pointing at a different prefix so requests can be told apart.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use brain_client::{Client, ClientConfig, Endpoint};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok-123";

/// Config with every endpoint except billing pointed at `server`.
pub fn config_without_billing(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_endpoint(Endpoint::Auth, format!("{}/auth", server.uri()))
        .with_endpoint(Endpoint::Brain, format!("{}/brain", server.uri()))
        .with_endpoint(Endpoint::Spp, format!("{}/spp", server.uri()))
        .with_endpoint(Endpoint::Api, format!("{}/api", server.uri()))
        .allow_insecure(true)
}

/// Config with every endpoint pointed at `server`.
pub fn config(server: &MockServer) -> ClientConfig {
    config_without_billing(server)
        .with_endpoint(Endpoint::Billing, format!("{}/billing", server.uri()))
}

/// Mount the auth service's session lookup for `token`.
pub async fn mount_session(server: &MockServer, token: &str, username: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/auth/session/{}", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": username,
            "factors": ["password"],
            "group_memberships": ["staff"],
        })))
        .mount(server)
        .await;
}

/// A client already holding a session for [`TOKEN`].
pub async fn authenticated_client(server: &MockServer, config: ClientConfig) -> Client {
    mount_session(server, TOKEN, "alice").await;
    let client = Client::new(config).expect("client");
    client
        .authenticate_with_token(TOKEN)
        .await
        .expect("token authentication");
    client
}
