// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Serde models for the parts of the Lotus JSON-RPC surface the exporter reads.
//!
//! Lotus renders Go structs with their field names verbatim, so everything here
//! is `#[serde(rename_all = "PascalCase")]`, with explicit renames where Go's
//! acronyms don't survive the conversion (`ID`, `CPUs`, `WPoSt...`).
//!
//! # Conventions
//! - Big integers (balances, collateral, deal weights) arrive as decimal strings.
//!   Use `#[serde(with = "stringify")]` on a [`num_bigint::BigInt`].
//! - Go `nil` slices arrive as `null`. Use `#[serde_as(as = "DefaultOnNull")]`
//!   together with `#[serde(default)]` so both `null` and a missing field decode
//!   as empty.
//! - Bitfields arrive as run lengths and stay undecoded until counted, see
//!   [`SectorSet`].
//!
//! Only the fields we turn into metrics are modelled; unknown fields are ignored.

mod bit_field;
mod deadline;
mod market_deal;
mod message;
mod miner_info;
mod sector;
mod tipset;
mod token_amount;
mod version;
mod worker;

pub use bit_field::SectorSet;
pub use deadline::{ApiDeadline, DeadlineInfo, MinerPartition};
pub use market_deal::{DealProposal, DealState, MarketDeal};
pub use message::{Message, SignedMessage};
pub use miner_info::MinerInfo;
pub use sector::{SectorInfo, SectorLog};
pub use tipset::{HeadTipset, Tipset};
pub use token_amount::TokenAmount;
pub use version::ApiVersion;
pub use worker::{GpuUsage, JobId, SectorId, WorkerInfo, WorkerJob, WorkerResources, WorkerStats};

use serde::{Deserialize, Deserializer, Serializer};
use std::{fmt::Display, str::FromStr};

/// Chain epoch, as Lotus reports it.
pub type ChainEpoch = i64;

/// Usage: `#[serde(with = "stringify")]`
pub mod stringify {
    use super::*;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Decode `lotus_json` and compare it against the expected domain value.
#[cfg(test)]
pub fn assert_snapshot<T>(lotus_json: serde_json::Value, expected: T)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let actual = match serde_json::from_value::<T>(lotus_json.clone()) {
        Ok(it) => it,
        Err(e) => panic!(
            "couldn't deserialize a {} from {}: {e}",
            std::any::type_name::<T>(),
            lotus_json
        ),
    };
    pretty_assertions::assert_eq!(actual, expected);
}
