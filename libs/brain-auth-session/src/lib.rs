// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Interactive login for brain-client
//!
//! [`Login`] gets a [`brain_client::Client`] into an authenticated state:
//!
//! ```text
//!            stored token ok
//!   start ─────────────────────────────────────────────► Authenticated
//!     │ no token / token rejected                              ▲
//!     ▼                                                        │ ok (token stored)
//!   NeedCredentials ──► Authenticating ────────────────────────┘
//!     ▲                     │ bad credentials, attempts left
//!     └─────────────────────┘
//!                           │ anything else / out of attempts
//!                           ▼
//!                         Failed
//! ```
//!
//! Prompting and token persistence are injected through
//! [`CredentialSource`] and [`TokenStore`], so nothing here touches a
//! terminal or the filesystem.

pub mod credentials;
pub mod error;

pub use credentials::{CredentialMap, CredentialSource, LoginCredentials, TokenStore};
pub use error::{BoxError, LoginError};

use brain_client::Client;
use strum::Display;
use tracing::{debug, warn};

/// Credential attempts before giving up.
pub const MAX_ATTEMPTS: usize = 3;

/// Auth service messages meaning "try different credentials".
const RETRYABLE_MESSAGES: [&str; 2] = ["Badly-formed parameters", "Bad login credentials"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum LoginState {
    NeedCredentials,
    Authenticating,
    Authenticated,
    Failed,
}

/// Whether `err` means the credentials were wrong rather than that
/// something else broke.
pub fn is_retryable(err: &brain_client::Error) -> bool {
    let message = match err.api() {
        Some(api) => api.response_body.clone(),
        None => err.to_string(),
    };
    RETRYABLE_MESSAGES.iter().any(|m| message.contains(m))
}

/// One run of the login state machine.
pub struct Login<'a> {
    client: &'a Client,
    max_attempts: usize,
    attempts: usize,
    trace: Vec<LoginState>,
}

impl<'a> Login<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            max_attempts: MAX_ATTEMPTS,
            attempts: 0,
            trace: Vec::new(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Current state; `None` before [`Login::run`].
    pub fn state(&self) -> Option<LoginState> {
        self.trace.last().copied()
    }

    /// Credential attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Every state entered, in order.
    pub fn trace(&self) -> &[LoginState] {
        &self.trace
    }

    /// Authenticate, trying `token` first and then prompting.
    ///
    /// On failure the error that ended the loop is returned as-is.
    pub async fn run(
        &mut self,
        token: Option<&str>,
        source: &mut dyn CredentialSource,
        store: &mut dyn TokenStore,
    ) -> Result<(), LoginError> {
        self.trace.clear();
        self.attempts = 0;

        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.enter(LoginState::Authenticating);
            match self.client.authenticate_with_token(token).await {
                Ok(()) => {
                    self.enter(LoginState::Authenticated);
                    return Ok(());
                }
                Err(err) if err.is_transport() => {
                    self.enter(LoginState::Failed);
                    return Err(err.into());
                }
                Err(err) => debug!(error = %err, "stored token not accepted"),
            }
        }

        let mut previous: Option<brain_client::Error> = None;
        loop {
            self.enter(LoginState::NeedCredentials);
            let credentials = match source.credentials(previous.as_ref()) {
                Ok(credentials) => credentials,
                Err(err) => {
                    self.enter(LoginState::Failed);
                    return Err(LoginError::CredentialSource(err));
                }
            };

            self.enter(LoginState::Authenticating);
            self.attempts += 1;
            let map = credentials.to_map();
            let result = self.client.authenticate_with_credentials(&map).await;
            drop(map);
            drop(credentials);

            match result {
                Ok(()) => {
                    if let Err(err) = store.store_token(&self.client.auth_token()) {
                        warn!(error = %err, "could not save session token");
                    }
                    self.enter(LoginState::Authenticated);
                    return Ok(());
                }
                Err(err) if is_retryable(&err) && self.attempts < self.max_attempts => {
                    warn!(attempt = self.attempts, error = %err, "login failed, asking again");
                    previous = Some(err);
                }
                Err(err) => {
                    self.enter(LoginState::Failed);
                    return Err(err.into());
                }
            }
        }
    }

    fn enter(&mut self, state: LoginState) {
        debug!(%state, "login state");
        self.trace.push(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_messages() {
        assert!(is_retryable(&brain_client::Error::BadName(
            "Bad login credentials".to_string()
        )));
        assert!(!is_retryable(&brain_client::Error::NoAuthSession));
        assert!(!is_retryable(&brain_client::Error::EmptyToken));
    }

    #[test]
    fn test_state_before_run() {
        let client = Client::new(brain_client::ClientConfig::default()).unwrap();
        let login = Login::new(&client);
        assert_eq!(login.state(), None);
        assert_eq!(login.attempts(), 0);
        assert!(login.trace().is_empty());
    }

    #[test]
    fn test_max_attempts_at_least_one() {
        let client = Client::new(brain_client::ClientConfig::default()).unwrap();
        assert_eq!(Login::new(&client).with_max_attempts(0).max_attempts, 1);
    }
}
