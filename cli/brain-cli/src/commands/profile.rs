// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management commands

use anyhow::Result;
use brain_client::Endpoint;
use clap::Subcommand;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::config::{Config, Profile, env_profile, resolve_profile};
use crate::output::json;

#[derive(Subcommand, Clone)]
pub enum ProfileCommand {
    /// List all profiles
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Get profile details
    Get {
        /// Profile name (defaults to current; "env" reads BRAIN_* variables)
        name: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Set the current profile
    SetCurrent {
        /// Profile name (use '-' for previous)
        name: String,
    },
}

impl ProfileCommand {
    pub fn run(self) -> Result<()> {
        match self {
            Self::List { json: use_json } => list_profiles(use_json),
            Self::Get {
                name,
                json: use_json,
            } => get_profile(name.as_deref(), use_json),
            Self::SetCurrent { name } => set_current_profile(&name),
        }
    }
}

/// A profile as shown to the user: the token is reduced to whether one is
/// saved.
#[derive(Serialize)]
struct ProfileView {
    #[serde(flatten)]
    profile: Profile,
    #[serde(rename = "hasToken")]
    has_token: bool,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            has_token: profile.token.as_deref().is_some_and(|t| !t.is_empty()),
            profile: Profile {
                token: None,
                ..profile.clone()
            },
        }
    }
}

fn list_profiles(use_json: bool) -> Result<()> {
    let current = resolve_profile(None).ok().map(|p| p.name);

    let mut profiles: Vec<Profile> = Vec::new();
    if let Ok(env) = env_profile() {
        profiles.push(env);
    }
    for name in Profile::list_all()? {
        if let Ok(profile) = Profile::load(&name) {
            profiles.push(profile);
        }
    }

    if use_json {
        let views: Vec<ProfileView> = profiles.iter().map(ProfileView::from).collect();
        json::print_json(&views)?;
    } else {
        for profile in &profiles {
            let marker = if current.as_deref() == Some(profile.name.as_str()) {
                "*"
            } else {
                " "
            };
            let url = profile.endpoints.get(Endpoint::Brain).unwrap_or("-");
            println!("{} {:<16} {}", marker, profile.name, url);
        }
    }
    Ok(())
}

fn get_profile(name: Option<&str>, use_json: bool) -> Result<()> {
    let profile = match name {
        Some(n) => resolve_profile(Some(n))?,
        None => {
            let config = Config::load()?;
            let current = config
                .current_profile()
                .ok_or_else(|| anyhow::anyhow!("No current profile set"))?;
            Profile::load(current)?
        }
    };

    let view = ProfileView::from(&profile);
    if use_json {
        json::print_json(&view)?;
    } else {
        println!("Name:     {}", profile.name);
        for endpoint in Endpoint::iter() {
            println!(
                "{:<9} {}",
                format!("{}:", endpoint),
                profile.endpoints.get(endpoint).unwrap_or("-")
            );
        }
        println!("Insecure: {}", profile.insecure);
        if let Some(account) = &profile.account {
            println!("Account:  {}", account);
        }
        println!("Token:    {}", if view.has_token { "saved" } else { "-" });
    }
    Ok(())
}

fn set_current_profile(name: &str) -> Result<()> {
    let mut config = Config::load()?;

    let name = if name == "-" {
        config
            .old_profile
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No previous profile"))?
    } else {
        // Verify profile exists
        Profile::load(name)?;
        name.to_string()
    };

    config.set_current_profile(&name);
    config.save()?;
    println!("Current profile: {}", name);
    Ok(())
}
