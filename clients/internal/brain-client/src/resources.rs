// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource operations
//!
//! Each operation resolves the name it is given, then builds and runs one
//! request. Response payloads are returned as `serde_json::Value`.

use reqwest::Method;
use serde_json::Value;

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::names::{
    AccountName, AccountPather, DiscName, DiscPather, GroupName, GroupPather, VirtualMachineName,
    VirtualMachinePather,
};
use crate::types::{BillingAccount, BrainAccount};

impl Client {
    /// Accounts visible to the current session on the brain service.
    pub async fn list_accounts(&self) -> Result<Vec<BrainAccount>> {
        let mut req = self.build_request(Method::GET, Endpoint::Brain, "/accounts", &[])?;
        req.run_json(None).await
    }

    /// The caller's default billing account, if they have one.
    pub async fn get_default_billing_account(&self) -> Result<Option<BillingAccount>> {
        let mut req = self.build_request(Method::GET, Endpoint::Billing, "/api/v1/accounts", &[])?;
        let accounts: Vec<BillingAccount> = req.run_json(None).await?;
        Ok(accounts.into_iter().find(|a| !a.name.is_empty()))
    }

    pub async fn get_account(&self, name: &AccountName) -> Result<Value> {
        let name = self.resolve_account(name).await?;
        self.get_overview(&name.account_path()?).await
    }

    pub async fn get_group(&self, name: &GroupName) -> Result<Value> {
        let name = self.resolve_group(name).await?;
        self.get_overview(&name.group_path()?).await
    }

    pub async fn get_virtual_machine(&self, name: &VirtualMachineName) -> Result<Value> {
        let name = self.resolve_virtual_machine(name).await?;
        self.get_overview(&name.virtual_machine_path()?).await
    }

    /// Delete a virtual machine. With `purge` it is destroyed rather than
    /// moved to the deleted state.
    pub async fn delete_virtual_machine(&self, name: &VirtualMachineName, purge: bool) -> Result<()> {
        let name = self.resolve_virtual_machine(name).await?;
        let mut path = name.virtual_machine_path()?;
        if purge {
            path.push_str("?purge=true");
        }
        let mut req = self.build_request(Method::DELETE, Endpoint::Brain, &path, &[])?;
        req.run(None).await?;
        Ok(())
    }

    pub async fn get_disc(&self, name: &DiscName) -> Result<Value> {
        let name = self.resolve_disc(name).await?;
        let path = name.disc_path()?;
        let mut req = self.build_request(Method::GET, Endpoint::Brain, &path, &[])?;
        req.run_json(None).await
    }

    async fn get_overview(&self, path: &str) -> Result<Value> {
        let path = format!("{}?view=overview", path);
        let mut req = self.build_request(Method::GET, Endpoint::Brain, &path, &[])?;
        req.run_json(None).await
    }
}
