// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// One value of the `WorkerStats` map, keyed by worker UUID.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerStats {
    pub info: WorkerInfo,
    #[serde(default)]
    pub enabled: bool,
    pub mem_used_min: u64,
    pub mem_used_max: u64,
    pub gpu_used: GpuUsage,
    pub cpu_use: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerInfo {
    pub hostname: String,
    pub resources: WorkerResources,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerResources {
    pub mem_physical: u64,
    pub mem_swap: u64,
    pub mem_reserved: u64,
    #[serde(rename = "CPUs")]
    pub cpus: u64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "GPUs", default)]
    pub gpus: Vec<String>,
}

/// Older miners report whether the GPU is taken, newer ones what share of it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GpuUsage {
    Flag(bool),
    Share(f64),
}

impl GpuUsage {
    pub fn as_f64(self) -> f64 {
        match self {
            GpuUsage::Flag(true) => 1.0,
            GpuUsage::Flag(false) => 0.0,
            GpuUsage::Share(it) => it,
        }
    }
}

/// One element of a `WorkerJobs` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerJob {
    #[serde(rename = "ID")]
    pub id: JobId,
    pub sector: SectorId,
    pub task: String,
    /// `0` running, `-1` returned, `>0` assigned but waiting.
    pub run_wait: i64,
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobId {
    pub sector: SectorId,
    #[serde(rename = "ID")]
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectorId {
    pub miner: u64,
    pub number: u64,
}
