// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Brain Client Library
//!
//! This client addresses the brain family of services: the brain resource
//! API (accounts, groups, virtual machines, discs), billing, SPP credential
//! injection, a generic API service, and the auth service that issues
//! session tokens.
//!
//! ## Usage
//!
//! ```ignore
//! use brain_client::{Client, ClientConfig, Endpoint, VirtualMachineName};
//!
//! let config = ClientConfig::default()
//!     .with_endpoint(Endpoint::Auth, "https://auth.example.com")
//!     .with_endpoint(Endpoint::Brain, "https://brain.example.com")
//!     .with_endpoint(Endpoint::Billing, "https://billing.example.com");
//! let client = Client::new(config)?;
//!
//! client.authenticate_with_token(&stored_token).await?;
//!
//! // Blank account and group are filled in from the session's defaults
//! let name: VirtualMachineName = "web".parse()?;
//! let vm = client.get_virtual_machine(&name).await?;
//! ```
//!
//! ## Lower level
//!
//! Requests can also be built and run directly. A request is run at most
//! once.
//!
//! ```ignore
//! let mut req = client.build_request(
//!     Method::GET,
//!     Endpoint::Brain,
//!     "/accounts/{}/groups/{}",
//!     &["acme", "default"],
//! )?;
//! let response = req.run(None).await?;
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod names;
pub mod request;
pub mod resolver;
pub mod resources;
pub mod session;
pub mod types;

pub use client::{Client, user_agent};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, EndpointUrls};
pub use error::{ApiError, Error, Result};
pub use names::{
    AccountName, AccountPather, DiscName, DiscPather, GroupName, GroupPather, VirtualMachineName,
    VirtualMachinePather,
};
pub use request::{Request, Response};
pub use resolver::DEFAULT_GROUP;
pub use reqwest::{Method, StatusCode};
pub use session::{Credentials, Session};
pub use types::{BillingAccount, BrainAccount, SessionData};
