// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::stringify;
use num_bigint::BigInt;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// `SectorsStatus(sector, false)`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectorInfo {
    #[serde(rename = "SectorID")]
    pub sector_id: u64,
    pub state: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub deals: Vec<u64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub log: Vec<SectorLog>,
    #[serde(with = "stringify", default)]
    pub verified_deal_weight: BigInt,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectorLog {
    pub kind: String,
    /// Unix seconds.
    pub timestamp: u64,
}

const EVENT_START_CC: &str = "event;sealing.SectorStartCC";
const EVENT_PACKED: &str = "event;sealing.SectorPacked";
const EVENT_FINALIZED: &str = "event;sealing.SectorFinalized";

impl SectorInfo {
    /// Deal ids, without the zero placeholders Lotus uses for filler pieces.
    pub fn deal_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.deals.iter().copied().filter(|it| *it != 0)
    }

    /// Committed-capacity sectors start their log with `SectorStartCC`.
    pub fn is_pledged(&self) -> bool {
        self.log.first().is_some_and(|it| it.kind == EVENT_START_CC)
    }

    pub fn created_at(&self) -> Option<u64> {
        self.log.first().map(|it| it.timestamp)
    }

    pub fn packed_at(&self) -> Option<u64> {
        self.last_event(EVENT_PACKED)
    }

    pub fn finalized_at(&self) -> Option<u64> {
        self.last_event(EVENT_FINALIZED)
    }

    fn last_event(&self, kind: &str) -> Option<u64> {
        self.log
            .iter()
            .rev()
            .find(|it| it.kind == kind)
            .map(|it| it.timestamp)
    }
}
