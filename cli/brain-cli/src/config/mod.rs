// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management

pub mod paths;
pub mod profile;

pub use profile::{Config, Profile};

use anyhow::Result;
use brain_client::Endpoint;

/// Name of the profile built from environment variables
pub const ENV_PROFILE: &str = "env";

/// Environment variable holding each endpoint's base URL
pub fn endpoint_env_var(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Auth => "BRAIN_AUTH_URL",
        Endpoint::Brain => "BRAIN_URL",
        Endpoint::Billing => "BRAIN_BILLING_URL",
        Endpoint::Spp => "BRAIN_SPP_URL",
        Endpoint::Api => "BRAIN_API_URL",
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Build the "env" profile from BRAIN_* environment variables
pub fn env_profile() -> Result<Profile> {
    let mut profile = Profile::new(ENV_PROFILE);
    for endpoint in [
        Endpoint::Auth,
        Endpoint::Brain,
        Endpoint::Billing,
        Endpoint::Spp,
        Endpoint::Api,
    ] {
        if let Some(url) = env_value(endpoint_env_var(endpoint)) {
            profile.endpoints = profile.endpoints.with(endpoint, url);
        }
    }

    if !profile.endpoints.is_configured(Endpoint::Auth)
        && !profile.endpoints.is_configured(Endpoint::Brain)
    {
        anyhow::bail!("BRAIN_AUTH_URL or BRAIN_URL must be set");
    }

    profile.insecure = env_flag("BRAIN_INSECURE");
    profile.token = env_value("BRAIN_TOKEN");
    profile.account = env_value("BRAIN_ACCOUNT");
    Ok(profile)
}

/// Resolve which profile to use
///
/// Priority:
/// 1. --profile (or BRAIN_PROFILE, via clap)
/// 2. "env" if BRAIN_AUTH_URL or BRAIN_URL is set
/// 3. Current profile from config.json
///
/// `Ok(None)` means nothing is configured. Unreadable or malformed config
/// files are errors.
pub fn configured_profile(cli_profile: Option<&str>) -> Result<Option<Profile>> {
    if let Some(name) = cli_profile {
        if name == ENV_PROFILE {
            return env_profile().map(Some);
        }
        return Profile::load(name).map(Some);
    }

    if env_value("BRAIN_AUTH_URL").is_some() || env_value("BRAIN_URL").is_some() {
        return env_profile().map(Some);
    }

    let config = Config::load()?;
    match config.current_profile() {
        Some(name) => Profile::load(name).map(Some),
        None => Ok(None),
    }
}

/// Like [`configured_profile`], but having no profile is an error.
pub fn resolve_profile(cli_profile: Option<&str>) -> Result<Profile> {
    configured_profile(cli_profile)?.ok_or_else(no_profile_error)
}

pub fn no_profile_error() -> anyhow::Error {
    anyhow::anyhow!(
        "No profile configured. Use 'brain profile set-current' or set BRAIN_* environment variables."
    )
}
