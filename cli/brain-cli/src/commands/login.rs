// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Login: terminal prompts and token persistence for the retry loop

use std::path::PathBuf;

use anyhow::{Context, Result};
use brain_auth_session::{BoxError, CredentialSource, Login, LoginCredentials, TokenStore};
use brain_client::Client;
use dialoguer::{Input, Password};

use crate::config::{ENV_PROFILE, Profile, paths};

/// Prompts on the terminal for username, password and an optional
/// one-time code.
#[derive(Default)]
pub struct TerminalCredentialSource {
    last_username: Option<String>,
}

impl CredentialSource for TerminalCredentialSource {
    fn credentials(
        &mut self,
        previous: Option<&brain_client::Error>,
    ) -> Result<LoginCredentials, BoxError> {
        if let Some(err) = previous {
            eprintln!("Login failed: {}", err);
        }

        let mut input = Input::<String>::new().with_prompt("Username");
        if let Some(name) = &self.last_username {
            input = input.default(name.clone());
        }
        let username = input.interact_text()?;
        let password = Password::new().with_prompt("Password").interact()?;
        let code: String = Input::new()
            .with_prompt("One-time code (blank if none)")
            .allow_empty(true)
            .interact_text()?;

        self.last_username = Some(username.clone());
        let credentials = LoginCredentials::new(username, password);
        Ok(if code.trim().is_empty() {
            credentials
        } else {
            credentials.with_one_time_code(code.trim())
        })
    }
}

/// Saves the new token into the saved profile it came from.
///
/// The profile is re-read from disk so CLI and environment overrides
/// applied for this run are not written back with the token.
pub struct ProfileTokenStore {
    name: String,
    path: PathBuf,
}

impl ProfileTokenStore {
    pub fn new(name: &str) -> Self {
        Self::at(name, paths::profile_path(name))
    }

    pub fn at(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
        }
    }
}

impl TokenStore for ProfileTokenStore {
    fn store_token(&mut self, token: &str) -> Result<(), BoxError> {
        if self.name == ENV_PROFILE {
            return Err("the env profile is not saved; export BRAIN_TOKEN to reuse the session".into());
        }
        let mut saved = Profile::load_from(&self.path)?;
        saved.token = Some(token.to_string());
        Ok(saved.save_to(&self.path)?)
    }
}

/// A client for `profile` with an authenticated session, prompting for
/// credentials if the saved token is missing or stale.
pub async fn authenticated_client(profile: &Profile) -> Result<Client> {
    let client = Client::new(profile.to_client_config()).context("Failed to create client")?;
    let token = client.config().token.clone();

    let mut source = TerminalCredentialSource::default();
    let mut store = ProfileTokenStore::new(&profile.name);
    let mut login = Login::new(&client);
    login
        .run(token.as_deref(), &mut source, &mut store)
        .await
        .context("Login failed")?;
    tracing::debug!(attempts = login.attempts(), trace = ?login.trace(), "logged in");

    Ok(client)
}

pub async fn run(profile: &Profile) -> Result<()> {
    let client = authenticated_client(profile).await?;
    println!("Logged in as {}", client.auth_username());
    Ok(())
}
