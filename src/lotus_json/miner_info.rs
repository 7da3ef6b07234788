// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// `StateMinerInfo`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MinerInfo {
    pub owner: String,
    pub worker: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub control_addresses: Vec<String>,
    pub sector_size: u64,
}

impl MinerInfo {
    /// The first control address, or the worker when the miner has none.
    pub fn control0(&self) -> &str {
        self.control_addresses
            .first()
            .map(String::as_str)
            .unwrap_or(&self.worker)
    }
}
