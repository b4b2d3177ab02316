// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Session inspection and impersonation

use anyhow::{Context, Result};
use brain_client::Client;
use serde_json::json;

use super::login::authenticated_client;
use crate::config::Profile;
use crate::output::json;

fn print_identity(client: &Client) -> Result<()> {
    json::print_json(&json!({
        "username": client.auth_username(),
        "factors": client.auth_factors(),
        "group_memberships": client.auth_group_memberships(),
    }))
}

pub async fn whoami(profile: &Profile) -> Result<()> {
    let client = authenticated_client(profile).await?;
    print_identity(&client)
}

/// Switch to `username`'s identity and show it. The token is printed so
/// it can be exported as BRAIN_TOKEN; the profile keeps its own.
pub async fn impersonate(profile: &Profile, username: &str) -> Result<()> {
    let client = authenticated_client(profile).await?;
    client
        .impersonate(username)
        .await
        .with_context(|| format!("Failed to impersonate '{}'", username))?;
    print_identity(&client)?;
    eprintln!("BRAIN_TOKEN={}", client.auth_token());
    Ok(())
}
