// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Show a single resource

use anyhow::Result;
use brain_client::{AccountName, Client, DiscName, GroupName, VirtualMachineName};
use clap::Subcommand;

use crate::output::json;

/// Names are dotted and most specific first, e.g. `web1.default.acme`.
/// Leaving out the account or group uses the defaults.
#[derive(Subcommand, Clone)]
pub enum ShowCommand {
    /// Show an account (blank for the default account)
    Account {
        #[arg(default_value = "")]
        name: String,
    },

    /// Show a group, e.g. `default.acme`
    Group { name: String },

    /// Show a virtual machine, e.g. `web1.default.acme`
    #[command(alias = "server")]
    Vm { name: String },

    /// Show a disc, e.g. `vda.web1.default.acme`
    Disc { name: String },
}

impl ShowCommand {
    pub async fn run(self, client: &Client) -> Result<()> {
        let value = match self {
            Self::Account { name } => client.get_account(&name.parse::<AccountName>()?).await?,
            Self::Group { name } => client.get_group(&name.parse::<GroupName>()?).await?,
            Self::Vm { name } => {
                client
                    .get_virtual_machine(&name.parse::<VirtualMachineName>()?)
                    .await?
            }
            Self::Disc { name } => client.get_disc(&name.parse::<DiscName>()?).await?,
        };
        json::print_json(&value)
    }
}
