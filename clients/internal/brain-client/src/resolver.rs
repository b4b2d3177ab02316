// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Filling in blank name components
//!
//! Each resolver takes a name by reference and returns a resolved copy, so
//! a failure part-way through leaves the caller's name exactly as it was.
//! Resolving an already fully specified name makes no requests.
//!
//! Defaults:
//!
//! - account: the pinned `fixed_default_account` if configured; otherwise
//!   the first brain account when no billing endpoint is configured;
//!   otherwise the caller's default billing account. Only possible once
//!   authenticated.
//! - group: [`DEFAULT_GROUP`].
//! - virtual machine and disc: no default.

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::names::{AccountName, DiscName, GroupName, VirtualMachineName};

/// Group used when a name leaves its group blank.
pub const DEFAULT_GROUP: &str = "default";

impl Client {
    pub async fn resolve_account(&self, name: &AccountName) -> Result<AccountName> {
        let mut resolved = name.clone();
        if resolved.account.is_empty() {
            resolved.account = self.default_account().await?;
        }
        Ok(resolved)
    }

    pub async fn resolve_group(&self, name: &GroupName) -> Result<GroupName> {
        let mut resolved = name.clone();
        if resolved.account.is_empty() {
            resolved.account = self.resolve_account(&name.account_name()).await?.account;
        }
        if resolved.group.is_empty() {
            resolved.group = DEFAULT_GROUP.to_string();
        }
        Ok(resolved)
    }

    pub async fn resolve_virtual_machine(
        &self,
        name: &VirtualMachineName,
    ) -> Result<VirtualMachineName> {
        if name.virtual_machine.is_empty() {
            return Err(Error::BadName(
                "a virtual machine name is required".to_string(),
            ));
        }
        let group = self.resolve_group(&name.group_name()).await?;
        Ok(VirtualMachineName {
            account: group.account,
            group: group.group,
            virtual_machine: name.virtual_machine.clone(),
        })
    }

    /// Resolve the disc's virtual machine. The label is left as given.
    pub async fn resolve_disc(&self, name: &DiscName) -> Result<DiscName> {
        let virtual_machine = self.resolve_virtual_machine(&name.virtual_machine).await?;
        Ok(DiscName {
            virtual_machine,
            label: name.label.clone(),
        })
    }

    /// The account used when a name does not give one.
    pub async fn default_account(&self) -> Result<String> {
        if !self.is_authenticated() {
            return Err(Error::NoDefaultAccount);
        }

        if let Some(account) = self
            .config()
            .fixed_default_account
            .as_deref()
            .filter(|a| !a.is_empty())
        {
            return Ok(account.to_string());
        }

        let account = if self.config().endpoints.is_configured(Endpoint::Billing) {
            self.get_default_billing_account()
                .await?
                .map(|billing| billing.name)
        } else {
            self.list_accounts()
                .await?
                .into_iter()
                .next()
                .map(|account| account.name)
        };

        match account.filter(|a| !a.is_empty()) {
            Some(account) => {
                tracing::debug!(account = %account, "using default account");
                Ok(account)
            }
            None => Err(Error::NoDefaultAccount),
        }
    }
}
