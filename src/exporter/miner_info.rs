// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::error::ExporterError;
use crate::lotus_json::MinerInfo;
use crate::metrics::{GaugeFamily, Labels, MetricSection};
use crate::rpc_api::FullNodeApi;

/// The miner's role addresses, as ID addresses and as the account keys
/// behind them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MinerRoles {
    pub info: MinerInfo,
    pub owner_addr: String,
    pub worker_addr: String,
    pub control0_addr: String,
}

impl MinerRoles {
    pub async fn fetch(node: &dyn FullNodeApi, miner_id: &str) -> Result<Self, ExporterError> {
        let info = node.state_miner_info(miner_id).await?;
        let owner_addr = node.state_account_key(&info.owner).await?;
        let worker_addr = node.state_account_key(&info.worker).await?;
        let control0_addr = node.state_account_key(info.control0()).await?;
        Ok(Self {
            info,
            owner_addr,
            worker_addr,
            control0_addr,
        })
    }

    /// Which role, if any, sends from `address`.
    pub fn role_of(&self, address: &str) -> Option<&'static str> {
        if address == self.owner_addr {
            Some("owner")
        } else if address == self.worker_addr {
            Some("worker")
        } else if address == self.control0_addr {
            Some("control0")
        } else {
            None
        }
    }
}

pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let version = scrape.miner.version().await?;
    let roles = MinerRoles::fetch(scrape.node, scrape.miner_id()).await?;

    let mut info = GaugeFamily::new(
        "miner_info",
        "Miner version and role addresses, value is always 1",
    );
    info.push(
        scrape
            .labels()
            .with("version", &version.version)
            .with("owner", &roles.info.owner)
            .with("owner_addr", &roles.owner_addr)
            .with("worker", &roles.info.worker)
            .with("worker_addr", &roles.worker_addr)
            .with("control0", roles.info.control0())
            .with("control0_addr", &roles.control0_addr),
        1u64,
    );
    let mut sector_size = GaugeFamily::new("miner_info_sector_size", "Miner sector size in bytes");
    sector_size.push(
        Labels::new().with("miner_id", scrape.miner_id()),
        roles.info.sector_size,
    );
    out.add(info).add(sector_size);
    Ok(())
}
