// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration
//!
//! A [`ClientConfig`] is handed to [`crate::Client::new`] once and is
//! read-only for the lifetime of the client. Loading it from files or the
//! environment is the caller's business.

use std::time::Duration;

use crate::endpoint::{Endpoint, EndpointUrls};

/// Immutable configuration for a [`crate::Client`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Base URL per backend service
    pub endpoints: EndpointUrls,

    /// Permit plain `http://` requests. Off by default so that tokens are
    /// never sent in the clear by accident.
    pub allow_insecure: bool,

    /// Token persisted from an earlier session, if resuming one
    pub token: Option<String>,

    /// Account used when a name leaves its account blank, instead of asking
    /// the billing or brain service. Some deployments have no usable billing
    /// default and pin one here.
    pub fixed_default_account: Option<String>,

    /// Overall per-request timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoints: EndpointUrls) -> Self {
        Self {
            endpoints,
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint, url: impl Into<String>) -> Self {
        self.endpoints = self.endpoints.with(endpoint, url);
        self
    }

    pub fn allow_insecure(mut self, allow: bool) -> Self {
        self.allow_insecure = allow;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_fixed_default_account(mut self, account: impl Into<String>) -> Self {
        self.fixed_default_account = Some(account.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
