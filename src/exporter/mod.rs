// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! One scrape: identify the miner, then collect every enabled section in a
//! fixed order.
//!
//! Sections run one after another and each is registered into the
//! [`Exposition`] as soon as it is done. The first failing section stops the
//! scrape; everything registered before it is still rendered by the caller.

mod chain;
mod daemon;
mod deadlines;
mod jobs;
mod miner_info;
mod mpool;
mod sectors;
mod wallets;
mod workers;

#[cfg(test)]
mod tests;

use crate::deadlines::EPOCH_DURATION_SECONDS;
use crate::error::ExporterError;
use crate::metrics::{Exposition, Labels, MetricSection};
use crate::rpc_api::{FullNodeApi, StorageMinerApi};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use strum::{Display, EnumIter, IntoEnumIterator as _};

/// The parts of a scrape, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Section {
    Chain,
    Wallets,
    MinerInfo,
    Daemon,
    Mpool,
    Workers,
    Jobs,
    Sectors,
    Deadlines,
}

/// Which sections to collect. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Collectors {
    pub chain: bool,
    pub wallets: bool,
    pub miner_info: bool,
    pub daemon: bool,
    pub mpool: bool,
    pub workers: bool,
    pub jobs: bool,
    pub sectors: bool,
    pub deadlines: bool,
}

impl Default for Collectors {
    fn default() -> Self {
        Self {
            chain: true,
            wallets: true,
            miner_info: true,
            daemon: true,
            mpool: true,
            workers: true,
            jobs: true,
            sectors: true,
            deadlines: true,
        }
    }
}

impl Collectors {
    pub fn is_enabled(&self, section: Section) -> bool {
        match section {
            Section::Chain => self.chain,
            Section::Wallets => self.wallets,
            Section::MinerInfo => self.miner_info,
            Section::Daemon => self.daemon,
            Section::Mpool => self.mpool,
            Section::Workers => self.workers,
            Section::Jobs => self.jobs,
            Section::Sectors => self.sectors,
            Section::Deadlines => self.deadlines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    pub epoch_duration_seconds: i64,
    /// Value of the `miner_host` label. Defaults to the local hostname.
    pub miner_host: Option<String>,
    pub collectors: Collectors,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            epoch_duration_seconds: EPOCH_DURATION_SECONDS,
            miner_host: None,
            collectors: Collectors::default(),
        }
    }
}

/// Identity labels carried by every sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerContext {
    pub miner_id: String,
    pub miner_host: String,
}

impl MinerContext {
    pub fn labels(&self) -> Labels {
        Labels::new()
            .with("miner_id", &self.miner_id)
            .with("miner_host", &self.miner_host)
    }
}

/// Everything a section needs to collect itself.
pub(crate) struct Scrape<'a> {
    pub node: &'a dyn FullNodeApi,
    pub miner: &'a dyn StorageMinerApi,
    pub target: MinerContext,
    pub started_at: DateTime<Utc>,
    pub epoch_duration_seconds: i64,
}

impl Scrape<'_> {
    pub fn miner_id(&self) -> &str {
        &self.target.miner_id
    }

    pub fn labels(&self) -> Labels {
        self.target.labels()
    }
}

pub struct Exporter<'a> {
    node: &'a dyn FullNodeApi,
    miner: &'a dyn StorageMinerApi,
    config: ExporterConfig,
    started_at: DateTime<Utc>,
}

impl<'a> Exporter<'a> {
    /// `started_at` is the reference point for job durations.
    pub fn new(
        node: &'a dyn FullNodeApi,
        miner: &'a dyn StorageMinerApi,
        config: ExporterConfig,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            node,
            miner,
            config,
            started_at,
        }
    }

    pub async fn collect(&self, exposition: &mut Exposition) -> Result<(), ExporterError> {
        let miner_id = self.miner.actor_address().await?;
        let miner_host = match &self.config.miner_host {
            Some(host) => host.clone(),
            None => gethostname::gethostname().to_string_lossy().into_owned(),
        };
        tracing::info!(%miner_id, %miner_host, "scraping");
        let scrape = Scrape {
            node: self.node,
            miner: self.miner,
            target: MinerContext {
                miner_id,
                miner_host,
            },
            started_at: self.started_at,
            epoch_duration_seconds: self.config.epoch_duration_seconds,
        };

        for section in Section::iter().filter(|it| self.config.collectors.is_enabled(*it)) {
            let start = Instant::now();
            let mut metrics = MetricSection::new();
            let result = collect_section(section, &scrape, &mut metrics).await;
            exposition.register(metrics);
            if let Err(e) = result {
                tracing::warn!(%section, "section failed after {:?}", start.elapsed());
                return Err(e);
            }
            tracing::debug!(%section, "collected in {:?}", start.elapsed());
        }
        Ok(())
    }
}

async fn collect_section(
    section: Section,
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    match section {
        Section::Chain => chain::collect(scrape, out).await,
        Section::Wallets => wallets::collect(scrape, out).await,
        Section::MinerInfo => miner_info::collect(scrape, out).await,
        Section::Daemon => daemon::collect(scrape, out).await,
        Section::Mpool => mpool::collect(scrape, out).await,
        Section::Workers => workers::collect(scrape, out).await,
        Section::Jobs => jobs::collect(scrape, out).await,
        Section::Sectors => sectors::collect(scrape, out).await,
        Section::Deadlines => deadlines::collect(scrape, out).await,
    }
}

/// `f3abc...vwxyz`. Addresses of ten characters or fewer are returned whole.
pub fn short_address(address: &str) -> String {
    let len = address.chars().count();
    if len <= 10 {
        return address.to_owned();
    }
    let head = address.chars().take(5).collect::<String>();
    let tail = address.chars().skip(len - 5).collect::<String>();
    format!("{head}...{tail}")
}
