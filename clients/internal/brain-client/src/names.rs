// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource names and their REST paths
//!
//! Names are written least-specific last, separated by dots:
//!
//! ```text
//! account
//! group[.account]
//! vm[.group[.account]]
//! disc.vm[.group[.account]]
//! ```
//!
//! Any component may be left blank (`web..acme`, `web.`) and filled in later
//! by the resolver. Components past the last one a name type understands
//! are treated as a hostname suffix and dropped, so
//! `web.default.acme.uk0.example.net` names the VM `web`.
//!
//! Paths are only produced for fully specified names. Code that builds
//! requests takes the capability traits ([`AccountPather`] and friends)
//! rather than a concrete name type, so a VM name can be passed wherever a
//! group or account is wanted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Anything addressable as an account.
pub trait AccountPather {
    /// `/accounts/{account}`
    fn account_path(&self) -> Result<String>;
}

/// Anything addressable as a group.
pub trait GroupPather: AccountPather {
    /// `/accounts/{account}/groups/{group}`
    fn group_path(&self) -> Result<String>;
}

/// Anything addressable as a virtual machine.
pub trait VirtualMachinePather: GroupPather {
    /// `/accounts/{account}/groups/{group}/virtual_machines/{vm}`
    fn virtual_machine_path(&self) -> Result<String>;
}

/// Anything addressable as a disc.
pub trait DiscPather: VirtualMachinePather {
    /// `.../virtual_machines/{vm}/discs/{disc}`
    fn disc_path(&self) -> Result<String>;
}

/// Escape one path component, refusing blanks.
fn segment(field: &'static str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::NotFullySpecified { field });
    }
    escape_component(value)
}

/// Percent-escape `value` as a single path component.
///
/// `.` and `..` survive escaping and would be collapsed by URL parsing into
/// a different path, so they are refused.
pub(crate) fn escape_component(value: &str) -> Result<String> {
    if value == "." || value == ".." {
        return Err(Error::BadName(format!(
            "{:?} is not a valid path component",
            value
        )));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Split a dotted name into exactly `N` trimmed components.
fn components<const N: usize>(input: &str) -> [String; N] {
    let mut parts: [String; N] = std::array::from_fn(|_| String::new());
    let mut pieces = input.trim().split('.');
    for slot in parts.iter_mut() {
        match pieces.next() {
            Some(piece) => *slot = piece.trim().to_string(),
            None => break,
        }
    }
    let suffix: Vec<&str> = pieces.collect();
    if !suffix.is_empty() {
        tracing::debug!(name = input, suffix = %suffix.join("."), "dropping name suffix");
    }
    parts
}

/// Join components with dots, leaving off blank trailing ones.
fn dotted(parts: &[&str]) -> String {
    let end = parts
        .iter()
        .rposition(|p| !p.is_empty())
        .map_or(0, |i| i + 1);
    parts[..end].join(".")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountName {
    pub account: String,
}

impl AccountName {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    pub fn is_fully_specified(&self) -> bool {
        !self.account.is_empty()
    }
}

impl AccountPather for AccountName {
    fn account_path(&self) -> Result<String> {
        Ok(format!("/accounts/{}", segment("account", &self.account)?))
    }
}

impl FromStr for AccountName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [account] = components::<1>(s);
        Ok(Self { account })
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.account)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupName {
    pub account: String,
    pub group: String,
}

impl GroupName {
    pub fn new(account: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            group: group.into(),
        }
    }

    pub fn account_name(&self) -> AccountName {
        AccountName::new(self.account.clone())
    }

    pub fn is_fully_specified(&self) -> bool {
        !self.account.is_empty() && !self.group.is_empty()
    }
}

impl AccountPather for GroupName {
    fn account_path(&self) -> Result<String> {
        self.account_name().account_path()
    }
}

impl GroupPather for GroupName {
    fn group_path(&self) -> Result<String> {
        let account = self.account_path()?;
        Ok(format!("{}/groups/{}", account, segment("group", &self.group)?))
    }
}

impl FromStr for GroupName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [group, account] = components::<2>(s);
        Ok(Self { account, group })
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dotted(&[&self.group, &self.account]))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualMachineName {
    pub account: String,
    pub group: String,
    pub virtual_machine: String,
}

impl VirtualMachineName {
    pub fn new(
        account: impl Into<String>,
        group: impl Into<String>,
        virtual_machine: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            group: group.into(),
            virtual_machine: virtual_machine.into(),
        }
    }

    pub fn group_name(&self) -> GroupName {
        GroupName::new(self.account.clone(), self.group.clone())
    }

    pub fn is_fully_specified(&self) -> bool {
        !self.account.is_empty() && !self.group.is_empty() && !self.virtual_machine.is_empty()
    }
}

impl AccountPather for VirtualMachineName {
    fn account_path(&self) -> Result<String> {
        self.group_name().account_path()
    }
}

impl GroupPather for VirtualMachineName {
    fn group_path(&self) -> Result<String> {
        self.group_name().group_path()
    }
}

impl VirtualMachinePather for VirtualMachineName {
    fn virtual_machine_path(&self) -> Result<String> {
        let group = self.group_path()?;
        Ok(format!(
            "{}/virtual_machines/{}",
            group,
            segment("virtual_machine", &self.virtual_machine)?
        ))
    }
}

impl FromStr for VirtualMachineName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [virtual_machine, group, account] = components::<3>(s);
        if virtual_machine.is_empty() {
            return Err(Error::BadName(format!(
                "{:?} does not name a virtual machine",
                s
            )));
        }
        Ok(Self {
            account,
            group,
            virtual_machine,
        })
    }
}

impl fmt::Display for VirtualMachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dotted(&[&self.virtual_machine, &self.group, &self.account]))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscName {
    pub virtual_machine: VirtualMachineName,
    /// Disc label, or its numeric ID
    pub label: String,
}

impl DiscName {
    pub fn new(virtual_machine: VirtualMachineName, label: impl Into<String>) -> Self {
        Self {
            virtual_machine,
            label: label.into(),
        }
    }

    pub fn is_fully_specified(&self) -> bool {
        self.virtual_machine.is_fully_specified() && !self.label.is_empty()
    }
}

impl AccountPather for DiscName {
    fn account_path(&self) -> Result<String> {
        self.virtual_machine.account_path()
    }
}

impl GroupPather for DiscName {
    fn group_path(&self) -> Result<String> {
        self.virtual_machine.group_path()
    }
}

impl VirtualMachinePather for DiscName {
    fn virtual_machine_path(&self) -> Result<String> {
        self.virtual_machine.virtual_machine_path()
    }
}

impl DiscPather for DiscName {
    fn disc_path(&self) -> Result<String> {
        let vm = self.virtual_machine_path()?;
        Ok(format!("{}/discs/{}", vm, segment("disc", &self.label)?))
    }
}

impl FromStr for DiscName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [label, virtual_machine, group, account] = components::<4>(s);
        if label.is_empty() {
            return Err(Error::BadName(format!("{:?} does not name a disc", s)));
        }
        if virtual_machine.is_empty() {
            return Err(Error::BadName(format!(
                "{:?} does not name the disc's virtual machine",
                s
            )));
        }
        Ok(Self {
            virtual_machine: VirtualMachineName {
                account,
                group,
                virtual_machine,
            },
            label,
        })
    }
}

impl fmt::Display for DiscName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vm = &self.virtual_machine;
        f.write_str(&dotted(&[
            &self.label,
            &vm.virtual_machine,
            &vm.group,
            &vm.account,
        ]))
    }
}
