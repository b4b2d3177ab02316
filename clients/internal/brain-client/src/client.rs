// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The client handle

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::Session;

/// `User-Agent` sent with every request.
pub fn user_agent() -> String {
    format!("brain-client/{}", env!("CARGO_PKG_VERSION"))
}

/// A client for the brain family of services.
///
/// The client owns its configuration and the current [`Session`]. The
/// session sits behind a lock so a `&Client` can be shared, but it is
/// replaced only by the authentication methods; callers that authenticate
/// from several tasks at once get last-writer-wins.
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    session: RwLock<Option<Session>>,
}

impl Client {
    /// Create a client. No network I/O happens until a request is run.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // reqwest is built without a bundled rustls provider; install ring
        // unless the application already chose one.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = reqwest::Client::builder().user_agent(user_agent());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            config,
            session: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn read_session(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(|poisoned| {
            tracing::error!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub(crate) fn write_session(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.session.write().unwrap_or_else(|poisoned| {
            tracing::error!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config.endpoints)
            .field("allow_insecure", &self.config.allow_insecure)
            .field("authenticated", &self.read_session().is_some())
            .finish()
    }
}
