// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! brain - command-line interface for the brain control plane

use anyhow::Result;
use brain_client::Endpoint;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{DeleteCommand, ProfileCommand, ShowCommand};
use config::{ENV_PROFILE, Profile};

#[derive(Parser)]
#[command(
    name = "brain",
    version,
    about = "Manage accounts, groups and virtual machines on the brain control plane"
)]
struct Cli {
    /// Profile to use
    #[arg(short, long, global = true, env = "BRAIN_PROFILE")]
    profile: Option<String>,

    /// Auth service URL override
    #[arg(long, global = true, env = "BRAIN_AUTH_URL")]
    auth_url: Option<String>,

    /// Brain service URL override
    #[arg(short = 'U', long, global = true, env = "BRAIN_URL")]
    brain_url: Option<String>,

    /// Billing service URL override
    #[arg(long, global = true, env = "BRAIN_BILLING_URL")]
    billing_url: Option<String>,

    /// SPP service URL override
    #[arg(long, global = true, env = "BRAIN_SPP_URL")]
    spp_url: Option<String>,

    /// API service URL override
    #[arg(long, global = true, env = "BRAIN_API_URL")]
    api_url: Option<String>,

    /// Allow plain http:// endpoints
    #[arg(long, global = true, env = "BRAIN_INSECURE")]
    insecure: bool,

    /// Session token override
    #[arg(long, global = true, env = "BRAIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Default account override
    #[arg(short, long, global = true, env = "BRAIN_ACCOUNT")]
    account: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and save the session token to the profile
    Login,

    /// Show who the current session belongs to
    Whoami,

    /// Act as another user for the rest of this session
    Impersonate {
        /// Username to impersonate
        username: String,
    },

    /// Show a resource
    Show {
        #[command(subcommand)]
        command: ShowCommand,
    },

    /// Delete a resource
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        command: DeleteCommand,
    },

    /// Manage connection profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

impl Cli {
    fn endpoint_overrides(&self) -> [(Endpoint, Option<&String>); 5] {
        [
            (Endpoint::Auth, self.auth_url.as_ref()),
            (Endpoint::Brain, self.brain_url.as_ref()),
            (Endpoint::Billing, self.billing_url.as_ref()),
            (Endpoint::Spp, self.spp_url.as_ref()),
            (Endpoint::Api, self.api_url.as_ref()),
        ]
    }

    /// The selected profile with CLI/env overrides applied on top
    fn profile(&self) -> Result<Profile> {
        let has_overrides = self.endpoint_overrides().iter().any(|(_, url)| url.is_some());
        let mut profile = match config::configured_profile(self.profile.as_deref())? {
            Some(profile) => profile,
            None if has_overrides => Profile::new(ENV_PROFILE),
            None => return Err(config::no_profile_error()),
        };

        for (endpoint, url) in self.endpoint_overrides() {
            if let Some(url) = url.filter(|u| !u.is_empty()) {
                profile.endpoints = profile.endpoints.with(endpoint, url.clone());
            }
        }
        if self.insecure {
            profile.insecure = true;
        }
        if let Some(token) = &self.token {
            profile.token = Some(token.clone());
        }
        if let Some(account) = &self.account {
            profile.account = Some(account.clone());
        }
        Ok(profile)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("brain=debug,brain_client=debug,brain_auth_session=debug")
    } else if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Profile { command } => command.clone().run(),
        Commands::Login => commands::login::run(&cli.profile()?).await,
        Commands::Whoami => commands::session::whoami(&cli.profile()?).await,
        Commands::Impersonate { username } => {
            commands::session::impersonate(&cli.profile()?, username).await
        }
        Commands::Show { command } => {
            let client = commands::login::authenticated_client(&cli.profile()?).await?;
            command.clone().run(&client).await
        }
        Commands::Delete { command } => {
            let client = commands::login::authenticated_client(&cli.profile()?).await?;
            command.clone().run(&client).await
        }
    }
}
