// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! In-memory Lotus daemon and miner for unit tests.

use crate::error::ExporterError;
use crate::lotus_json::{
    ApiDeadline, ApiVersion, DeadlineInfo, MarketDeal, MinerInfo, MinerPartition, SectorInfo,
    SignedMessage, Tipset, TokenAmount, WorkerJob, WorkerStats,
};
use crate::rpc_api::{
    FullNodeApi, StorageMinerApi, chain_api, common_api, miner_api, mpool_api, state_api,
    wallet_api,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Records every method called on it, and answers [`ExporterError::Unavailable`]
/// for the methods in `unavailable`.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<Vec<String>>,
    unavailable: Vec<&'static str>,
}

impl CallLog {
    pub fn fail_on(&mut self, method: &'static str) {
        self.unavailable.push(method);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(
        &self,
        method: &'static str,
        detail: impl std::fmt::Display,
    ) -> Result<(), ExporterError> {
        self.calls.lock().unwrap().push(format!("{method}({detail})"));
        if self.unavailable.contains(&method) {
            return Err(ExporterError::Unavailable {
                method,
                reason: "connection refused".into(),
            });
        }
        Ok(())
    }
}

fn not_found(method: &'static str, what: impl std::fmt::Display) -> ExporterError {
    ExporterError::NotFound {
        method,
        reason: format!("{what}: actor not found"),
    }
}

#[derive(Debug, Clone)]
pub struct FakeMinerActor {
    pub info: MinerInfo,
    pub available_balance: TokenAmount,
    pub proving_deadline: DeadlineInfo,
    pub deadlines: Vec<ApiDeadline>,
    pub partitions: BTreeMap<u64, Vec<MinerPartition>>,
}

#[derive(Debug, Default)]
pub struct FakeNode {
    pub version: Option<ApiVersion>,
    pub height: i64,
    pub wallets: BTreeMap<String, TokenAmount>,
    pub account_keys: BTreeMap<String, String>,
    pub pending: Vec<SignedMessage>,
    pub network_name: String,
    pub network_version: u64,
    pub miners: BTreeMap<String, FakeMinerActor>,
    pub deals: BTreeMap<u64, MarketDeal>,
    pub log: CallLog,
}

impl FakeNode {
    fn miner(&self, method: &'static str, miner: &str) -> Result<&FakeMinerActor, ExporterError> {
        self.log.enter(method, miner)?;
        self.miners.get(miner).ok_or_else(|| not_found(method, miner))
    }
}

#[async_trait::async_trait]
impl FullNodeApi for FakeNode {
    async fn version(&self) -> Result<ApiVersion, ExporterError> {
        self.log.enter(common_api::VERSION, "")?;
        self.version
            .clone()
            .ok_or_else(|| not_found(common_api::VERSION, "version"))
    }

    async fn chain_head(&self) -> Result<Tipset, ExporterError> {
        self.log.enter(chain_api::CHAIN_HEAD, "")?;
        Ok(Tipset {
            height: self.height,
        })
    }

    async fn wallet_list(&self) -> Result<Vec<String>, ExporterError> {
        self.log.enter(wallet_api::WALLET_LIST, "")?;
        Ok(self.wallets.keys().cloned().collect())
    }

    async fn wallet_balance(&self, address: &str) -> Result<TokenAmount, ExporterError> {
        self.log.enter(wallet_api::WALLET_BALANCE, address)?;
        Ok(self.wallets.get(address).cloned().unwrap_or_default())
    }

    async fn mpool_pending(&self) -> Result<Vec<SignedMessage>, ExporterError> {
        self.log.enter(mpool_api::MPOOL_PENDING, "")?;
        Ok(self.pending.clone())
    }

    async fn state_network_name(&self) -> Result<String, ExporterError> {
        self.log.enter(state_api::STATE_NETWORK_NAME, "")?;
        Ok(self.network_name.clone())
    }

    async fn state_network_version(&self) -> Result<u64, ExporterError> {
        self.log.enter(state_api::STATE_NETWORK_VERSION, "")?;
        Ok(self.network_version)
    }

    async fn state_account_key(&self, address: &str) -> Result<String, ExporterError> {
        self.log.enter(state_api::STATE_ACCOUNT_KEY, address)?;
        self.account_keys
            .get(address)
            .cloned()
            .ok_or_else(|| not_found(state_api::STATE_ACCOUNT_KEY, address))
    }

    async fn state_miner_info(&self, miner: &str) -> Result<MinerInfo, ExporterError> {
        Ok(self.miner(state_api::STATE_MINER_INFO, miner)?.info.clone())
    }

    async fn state_miner_available_balance(
        &self,
        miner: &str,
    ) -> Result<TokenAmount, ExporterError> {
        Ok(self
            .miner(state_api::STATE_MINER_AVAILABLE_BALANCE, miner)?
            .available_balance
            .clone())
    }

    async fn state_miner_proving_deadline(
        &self,
        miner: &str,
    ) -> Result<DeadlineInfo, ExporterError> {
        Ok(self
            .miner(state_api::STATE_MINER_PROVING_DEADLINE, miner)?
            .proving_deadline
            .clone())
    }

    async fn state_miner_deadlines(&self, miner: &str) -> Result<Vec<ApiDeadline>, ExporterError> {
        Ok(self
            .miner(state_api::STATE_MINER_DEADLINES, miner)?
            .deadlines
            .clone())
    }

    async fn state_miner_partitions(
        &self,
        miner: &str,
        deadline_index: u64,
    ) -> Result<Option<Vec<MinerPartition>>, ExporterError> {
        self.log
            .enter(state_api::STATE_MINER_PARTITIONS, deadline_index)?;
        let actor = self
            .miners
            .get(miner)
            .ok_or_else(|| not_found(state_api::STATE_MINER_PARTITIONS, miner))?;
        Ok(actor.partitions.get(&deadline_index).cloned())
    }

    async fn state_market_storage_deal(&self, deal_id: u64) -> Result<MarketDeal, ExporterError> {
        self.log.enter(state_api::STATE_MARKET_STORAGE_DEAL, deal_id)?;
        self.deals
            .get(&deal_id)
            .cloned()
            .ok_or_else(|| ExporterError::Rpc {
                method: state_api::STATE_MARKET_STORAGE_DEAL,
                reason: format!("deal {deal_id} not found in market state"),
            })
    }
}

#[derive(Debug, Default)]
pub struct FakeMiner {
    pub actor_address: String,
    pub version: Option<ApiVersion>,
    pub worker_stats: BTreeMap<String, WorkerStats>,
    pub worker_jobs: BTreeMap<String, Vec<WorkerJob>>,
    pub sectors: BTreeMap<u64, SectorInfo>,
    pub log: CallLog,
}

#[async_trait::async_trait]
impl StorageMinerApi for FakeMiner {
    async fn actor_address(&self) -> Result<String, ExporterError> {
        self.log.enter(miner_api::ACTOR_ADDRESS, "")?;
        Ok(self.actor_address.clone())
    }

    async fn version(&self) -> Result<ApiVersion, ExporterError> {
        self.log.enter(common_api::VERSION, "")?;
        self.version
            .clone()
            .ok_or_else(|| not_found(common_api::VERSION, "version"))
    }

    async fn worker_stats(&self) -> Result<BTreeMap<String, WorkerStats>, ExporterError> {
        self.log.enter(miner_api::WORKER_STATS, "")?;
        Ok(self.worker_stats.clone())
    }

    async fn worker_jobs(&self) -> Result<BTreeMap<String, Vec<WorkerJob>>, ExporterError> {
        self.log.enter(miner_api::WORKER_JOBS, "")?;
        Ok(self.worker_jobs.clone())
    }

    async fn sectors_list(&self) -> Result<Vec<u64>, ExporterError> {
        self.log.enter(miner_api::SECTORS_LIST, "")?;
        Ok(self.sectors.keys().copied().collect())
    }

    async fn sectors_status(&self, sector: u64) -> Result<SectorInfo, ExporterError> {
        self.log.enter(miner_api::SECTORS_STATUS, sector)?;
        self.sectors
            .get(&sector)
            .cloned()
            .ok_or_else(|| not_found(miner_api::SECTORS_STATUS, sector))
    }
}
