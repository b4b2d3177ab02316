// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for brain-auth-session

use thiserror::Error;

/// Boxed error from an injected capability (prompt or token store).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that end a login attempt
#[derive(Error, Debug)]
pub enum LoginError {
    /// The last error from the client, unchanged
    #[error(transparent)]
    Client(#[from] brain_client::Error),

    /// The credential source could not supply credentials
    #[error("could not read credentials: {0}")]
    CredentialSource(#[source] BoxError),
}

impl LoginError {
    /// The client error that ended the login, if that is what happened.
    pub fn client_error(&self) -> Option<&brain_client::Error> {
        match self {
            LoginError::Client(err) => Some(err),
            LoginError::CredentialSource(_) => None,
        }
    }
}
