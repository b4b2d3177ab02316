// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for brain-cli integration tests

// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated, clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;

const BRAIN_VARS: [&str; 10] = [
    "BRAIN_PROFILE",
    "BRAIN_AUTH_URL",
    "BRAIN_URL",
    "BRAIN_BILLING_URL",
    "BRAIN_SPP_URL",
    "BRAIN_API_URL",
    "BRAIN_INSECURE",
    "BRAIN_TOKEN",
    "BRAIN_ACCOUNT",
    "RUST_LOG",
];

/// The brain binary with a private config dir and no inherited BRAIN_* settings
pub fn brain_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("brain").expect("Failed to find brain binary");
    for var in BRAIN_VARS {
        cmd.env_remove(var);
    }
    cmd.env("BRAIN_CONFIG_DIR", config_dir);
    cmd
}

/// Write a saved profile into `config_dir`
pub fn write_profile(config_dir: &Path, name: &str, body: &serde_json::Value) {
    let dir = config_dir.join("profiles.d");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(format!("{}.json", name)),
        serde_json::to_string_pretty(body).unwrap(),
    )
    .unwrap();
}
