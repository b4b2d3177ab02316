// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CLI commands

pub mod delete;
pub mod login;
pub mod profile;
pub mod session;
pub mod show;

pub use delete::DeleteCommand;
pub use profile::ProfileCommand;
pub use show::ShowCommand;
