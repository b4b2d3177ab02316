// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Backend service registry
//!
//! Every request is bound to exactly one [`Endpoint`]. The endpoint decides
//! which base URL the request path is resolved against, how the request body
//! is encoded, and which `Authorization` scheme carries the session token.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A named backend service.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Session creation and lookup
    Auth,
    /// Accounts, groups, virtual machines and discs
    Brain,
    /// Billing accounts, payment and person records
    Billing,
    /// Credential injection (form-encoded)
    Spp,
    /// Generic API service
    Api,
}

impl Endpoint {
    /// Whether request bodies for this endpoint are form-encoded instead of JSON.
    pub fn uses_form_encoding(self) -> bool {
        matches!(self, Endpoint::Spp)
    }

    /// Value of the `Authorization` header carrying `token` to this endpoint.
    ///
    /// Billing still speaks the older `Token token=` convention; everything
    /// else takes a bearer token.
    pub fn authorization_header(self, token: &str) -> String {
        match self {
            Endpoint::Billing => format!("Token token={}", token),
            _ => format!("Bearer {}", token),
        }
    }
}

/// Base URLs for each endpoint.
///
/// An endpoint whose URL is absent or blank is treated as not configured.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
}

impl EndpointUrls {
    /// Base URL configured for `endpoint`, if any.
    pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
        let url = match endpoint {
            Endpoint::Auth => &self.auth,
            Endpoint::Brain => &self.brain,
            Endpoint::Billing => &self.billing,
            Endpoint::Spp => &self.spp,
            Endpoint::Api => &self.api,
        };
        url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn is_configured(&self, endpoint: Endpoint) -> bool {
        self.get(endpoint).is_some()
    }

    /// Set the base URL for `endpoint`.
    pub fn with(mut self, endpoint: Endpoint, url: impl Into<String>) -> Self {
        let url = Some(url.into());
        match endpoint {
            Endpoint::Auth => self.auth = url,
            Endpoint::Brain => self.brain = url,
            Endpoint::Billing => self.billing = url,
            Endpoint::Spp => self.spp = url,
            Endpoint::Api => self.api = url,
        }
        self
    }
}
