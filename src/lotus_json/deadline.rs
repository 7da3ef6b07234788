// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{ChainEpoch, SectorSet};
use serde::Deserialize;

/// `StateMinerProvingDeadline`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeadlineInfo {
    pub current_epoch: ChainEpoch,
    pub period_start: ChainEpoch,
    pub index: u64,
    pub open: ChainEpoch,
    pub close: ChainEpoch,
    #[serde(rename = "WPoStPeriodDeadlines")]
    pub wpost_period_deadlines: u64,
    #[serde(rename = "WPoStChallengeWindow")]
    pub wpost_challenge_window: ChainEpoch,
}

/// One element of `StateMinerDeadlines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiDeadline {
    pub post_submissions: SectorSet,
    #[serde(default)]
    pub disputable_proof_count: u64,
}

/// One element of `StateMinerPartitions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MinerPartition {
    pub all_sectors: SectorSet,
    pub faulty_sectors: SectorSet,
    pub recovering_sectors: SectorSet,
    pub live_sectors: SectorSet,
    pub active_sectors: SectorSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lotus_json::assert_snapshot;
    use serde_json::json;

    #[test]
    fn deadline_info_snapshot() {
        assert_snapshot(
            json!({
                "CurrentEpoch": 1000,
                "PeriodStart": 960,
                "Index": 1,
                "Open": 990,
                "Close": 1050,
                "Challenge": 970,
                "FaultCutoff": 920,
                "WPoStPeriodDeadlines": 48,
                "WPoStProvingPeriod": 2880,
                "WPoStChallengeWindow": 60,
                "WPoStChallengeLookback": 20,
                "FaultDeclarationCutoff": 70
            }),
            DeadlineInfo {
                current_epoch: 1000,
                period_start: 960,
                index: 1,
                open: 990,
                close: 1050,
                wpost_period_deadlines: 48,
                wpost_challenge_window: 60,
            },
        );
    }

    #[test]
    fn partition_snapshot() {
        assert_snapshot(
            json!({
                "AllSectors": [0, 10],
                "FaultySectors": [0, 1],
                "RecoveringSectors": [0],
                "LiveSectors": [0, 5],
                "ActiveSectors": [0, 3]
            }),
            MinerPartition {
                all_sectors: SectorSet::from_runs([0, 10]),
                faulty_sectors: SectorSet::from_runs([0, 1]),
                recovering_sectors: SectorSet::from_runs([0]),
                live_sectors: SectorSet::from_runs([0, 5]),
                active_sectors: SectorSet::from_runs([0, 3]),
            },
        );
    }

    #[test]
    fn deadline_snapshot() {
        assert_snapshot(
            json!({ "PostSubmissions": [0, 2], "DisputableProofCount": 0 }),
            ApiDeadline {
                post_submissions: SectorSet::from_runs([0, 2]),
                disputable_proof_count: 0,
            },
        );
    }
}
