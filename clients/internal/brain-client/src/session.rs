// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Authenticated sessions
//!
//! A session is created by the auth service in two steps: `POST /session`
//! returns a plain-text token, then `GET /session/{token}` returns who that
//! token belongs to. The client only swaps in the new [`Session`] once both
//! steps have succeeded, so a failed login never disturbs the current one.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{Value, json};
use zeroize::Zeroize;

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::types::SessionData;

/// Credentials posted to the auth service, e.g. `username`, `password`
/// and an optional one-time code.
pub type Credentials = BTreeMap<String, String>;

/// The identity behind the token the client is currently using.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub factors: Vec<String>,
    pub group_memberships: Vec<String>,
}

impl Session {
    fn from_data(token: String, data: SessionData) -> Self {
        Self {
            token,
            username: data.username,
            factors: data.factors,
            group_memberships: data.group_memberships,
        }
    }
}

impl Client {
    /// Log in with a credential map and replace the current session.
    ///
    /// The JSON body built from `credentials` is wiped once the login
    /// request has been answered, and a failed login's error does not keep
    /// the request body. The copy handed to the HTTP transport cannot be
    /// reached and is not wiped. `credentials` itself is the caller's to
    /// clear.
    pub async fn authenticate_with_credentials(&self, credentials: &Credentials) -> Result<()> {
        let mut body = serde_json::to_value(credentials)?;
        let result = self.create_session(&body).await;
        scrub(&mut body);
        let token = result.map_err(|mut err| {
            if let Some(api) = err.api_mut() {
                api.request_body.zeroize();
            }
            err
        })?;
        self.establish(token).await
    }

    /// Adopt an existing token, replacing the current session.
    pub async fn authenticate_with_token(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::EmptyToken);
        }
        self.establish(token.to_string()).await
    }

    /// Switch to a session for `username`, authorised by the current one.
    pub async fn impersonate(&self, username: &str) -> Result<()> {
        let current = self.auth_token();
        if current.is_empty() {
            return Err(Error::NoAuthSession);
        }
        let body = json!({ "token": current, "impersonate": username });
        let token = self.create_session(&body).await?;
        self.establish(token).await?;
        tracing::debug!(username, "impersonating");
        Ok(())
    }

    /// Session details the auth service holds for `token`.
    pub async fn get_session_data(&self, token: &str) -> Result<SessionData> {
        let mut req =
            self.build_request_no_auth(Method::GET, Endpoint::Auth, "/session/{}", &[token])?;
        req.run_json(None).await
    }

    /// A copy of the current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.read_session().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_some()
    }

    /// Current token, or empty when not authenticated.
    pub fn auth_token(&self) -> String {
        self.read_session()
            .as_ref()
            .map(|s| s.token.clone())
            .unwrap_or_default()
    }

    /// Current username, or empty when not authenticated.
    pub fn auth_username(&self) -> String {
        self.read_session()
            .as_ref()
            .map(|s| s.username.clone())
            .unwrap_or_default()
    }

    /// Authentication factors of the current session.
    pub fn auth_factors(&self) -> Vec<String> {
        self.read_session()
            .as_ref()
            .map(|s| s.factors.clone())
            .unwrap_or_default()
    }

    pub fn auth_group_memberships(&self) -> Vec<String> {
        self.read_session()
            .as_ref()
            .map(|s| s.group_memberships.clone())
            .unwrap_or_default()
    }

    async fn create_session(&self, body: &Value) -> Result<String> {
        let mut req = self.build_request_no_auth(Method::POST, Endpoint::Auth, "/session", &[])?;
        let response = req.run(Some(body)).await?;
        let token = response.text().trim().to_string();
        if token.is_empty() {
            return Err(Error::EmptyToken);
        }
        Ok(token)
    }

    async fn establish(&self, token: String) -> Result<()> {
        let data = self.get_session_data(&token).await?;
        let session = Session::from_data(token, data);
        tracing::debug!(username = %session.username, "session established");
        *self.write_session() = Some(session);
        Ok(())
    }
}

/// Zeroize every string in a JSON value.
fn scrub(value: &mut Value) {
    match value {
        Value::String(s) => s.zeroize(),
        Value::Array(items) => items.iter_mut().for_each(scrub),
        Value::Object(fields) => fields.values_mut().for_each(scrub),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
