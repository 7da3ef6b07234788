// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write as _;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use tempfile::NamedTempFile;

/// Nothing listens on the TCP port 1 of the loopback interface.
pub const UNREACHABLE_API_INFO: &str = "/ip4/127.0.0.1/tcp/1/http";

pub fn exporter() -> Command {
    let mut cmd = cargo_bin_cmd!("lotus-exporter");
    cmd.env_remove("FULLNODE_API_INFO")
        .env_remove("MINER_API_INFO")
        .env_remove("LOTUS_EXPORTER_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

pub fn create_tmp_config(toml: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("couldn't create temp config");
    file.write_all(toml.as_bytes())
        .expect("couldn't write temp config");
    file
}
