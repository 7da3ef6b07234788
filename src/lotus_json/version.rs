// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::Deserialize;

/// `Version`, as answered by both the daemon and the miner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiVersion {
    pub version: String,
    #[serde(default)]
    pub block_delay: u64,
}
