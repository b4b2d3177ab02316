// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Delete resources

use anyhow::Result;
use brain_client::{Client, VirtualMachineName};
use clap::Subcommand;

#[derive(Subcommand, Clone)]
pub enum DeleteCommand {
    /// Delete a virtual machine
    #[command(alias = "server")]
    Vm {
        /// Virtual machine name, e.g. `web1.default.acme`
        name: String,
        /// Destroy it now instead of moving it to the deleted state
        #[arg(long)]
        purge: bool,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

impl DeleteCommand {
    pub async fn run(self, client: &Client) -> Result<()> {
        match self {
            Self::Vm { name, purge, force } => {
                let vm: VirtualMachineName = name.parse()?;

                if !force {
                    use dialoguer::Confirm;
                    let verb = if purge { "Purge" } else { "Delete" };
                    if !Confirm::new()
                        .with_prompt(format!("{} virtual machine '{}'?", verb, name))
                        .default(false)
                        .interact()?
                    {
                        return Ok(());
                    }
                }

                client.delete_virtual_machine(&vm, purge).await?;
                println!("Deleted virtual machine {}", name);
                Ok(())
            }
        }
    }
}
