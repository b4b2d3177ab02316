// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Credentials and the capabilities the login loop is given

use std::ops::Deref;

use brain_client::Credentials;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

use crate::error::BoxError;

/// Credential map key for the username
pub const USERNAME_KEY: &str = "username";
/// Credential map key for the password
pub const PASSWORD_KEY: &str = "password";
/// Credential map key for a hardware-token one-time code
pub const ONE_TIME_CODE_KEY: &str = "2fa_otp";

/// What a user typed at a login prompt.
pub struct LoginCredentials {
    pub username: String,
    pub password: SecretString,
    pub one_time_code: Option<String>,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            one_time_code: None,
        }
    }

    pub fn with_one_time_code(mut self, code: impl Into<String>) -> Self {
        self.one_time_code = Some(code.into());
        self
    }

    /// The map posted to the auth service. Its values are zeroized when
    /// it is dropped.
    pub fn to_map(&self) -> CredentialMap {
        let mut map = Credentials::new();
        map.insert(USERNAME_KEY.to_string(), self.username.clone());
        map.insert(
            PASSWORD_KEY.to_string(),
            self.password.expose_secret().to_string(),
        );
        if let Some(code) = self.one_time_code.as_deref().filter(|c| !c.is_empty()) {
            map.insert(ONE_TIME_CODE_KEY.to_string(), code.to_string());
        }
        CredentialMap(map)
    }
}

/// Plain credential map holding exposed secrets, wiped on drop.
pub struct CredentialMap(Credentials);

impl Deref for CredentialMap {
    type Target = Credentials;

    fn deref(&self) -> &Credentials {
        &self.0
    }
}

impl Zeroize for CredentialMap {
    fn zeroize(&mut self) {
        self.0.values_mut().for_each(Zeroize::zeroize);
    }
}

impl Drop for CredentialMap {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl std::fmt::Debug for CredentialMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("one_time_code", &self.one_time_code.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Supplies credentials when the login loop needs them.
///
/// `previous` is the error from the attempt before, so a prompt can say
/// why it is asking again.
pub trait CredentialSource {
    fn credentials(
        &mut self,
        previous: Option<&brain_client::Error>,
    ) -> Result<LoginCredentials, BoxError>;
}

/// Persists a newly issued token for later runs.
pub trait TokenStore {
    fn store_token(&mut self, token: &str) -> Result<(), BoxError>;
}
