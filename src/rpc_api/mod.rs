// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT
//! The slice of the Lotus JSON-RPC API the exporter consumes.
//!
//! Method names are grouped the way Lotus groups them. The two traits are the
//! seam between the exporter and the network: [`crate::rpc_client::Client`]
//! implements both over JSON-RPC, tests implement them in memory.

use crate::error::ExporterError;
use crate::lotus_json::{
    ApiDeadline, ApiVersion, DeadlineInfo, MarketDeal, MinerInfo, MinerPartition, SectorInfo,
    SignedMessage, Tipset, TokenAmount, WorkerJob, WorkerStats,
};
use std::collections::BTreeMap;

/// Calls served by the Lotus daemon.
#[async_trait::async_trait]
pub trait FullNodeApi: Send + Sync {
    async fn version(&self) -> Result<ApiVersion, ExporterError>;
    async fn chain_head(&self) -> Result<Tipset, ExporterError>;
    async fn wallet_list(&self) -> Result<Vec<String>, ExporterError>;
    async fn wallet_balance(&self, address: &str) -> Result<TokenAmount, ExporterError>;
    async fn mpool_pending(&self) -> Result<Vec<SignedMessage>, ExporterError>;
    async fn state_network_name(&self) -> Result<String, ExporterError>;
    async fn state_network_version(&self) -> Result<u64, ExporterError>;
    async fn state_account_key(&self, address: &str) -> Result<String, ExporterError>;
    async fn state_miner_info(&self, miner: &str) -> Result<MinerInfo, ExporterError>;
    async fn state_miner_available_balance(
        &self,
        miner: &str,
    ) -> Result<TokenAmount, ExporterError>;
    async fn state_miner_proving_deadline(
        &self,
        miner: &str,
    ) -> Result<DeadlineInfo, ExporterError>;
    async fn state_miner_deadlines(&self, miner: &str) -> Result<Vec<ApiDeadline>, ExporterError>;
    /// `None` when the deadline has no partitions (Lotus answers `null`).
    async fn state_miner_partitions(
        &self,
        miner: &str,
        deadline_index: u64,
    ) -> Result<Option<Vec<MinerPartition>>, ExporterError>;
    async fn state_market_storage_deal(&self, deal_id: u64) -> Result<MarketDeal, ExporterError>;
}

/// Calls served by the storage miner.
#[async_trait::async_trait]
pub trait StorageMinerApi: Send + Sync {
    async fn actor_address(&self) -> Result<String, ExporterError>;
    async fn version(&self) -> Result<ApiVersion, ExporterError>;
    /// Keyed by worker UUID.
    async fn worker_stats(&self) -> Result<BTreeMap<String, WorkerStats>, ExporterError>;
    /// Keyed by worker UUID.
    async fn worker_jobs(&self) -> Result<BTreeMap<String, Vec<WorkerJob>>, ExporterError>;
    async fn sectors_list(&self) -> Result<Vec<u64>, ExporterError>;
    async fn sectors_status(&self, sector: u64) -> Result<SectorInfo, ExporterError>;
}

pub mod common_api {
    pub const VERSION: &str = "Filecoin.Version";
}

pub mod chain_api {
    pub const CHAIN_HEAD: &str = "Filecoin.ChainHead";
}

pub mod mpool_api {
    pub const MPOOL_PENDING: &str = "Filecoin.MpoolPending";
}

pub mod wallet_api {
    pub const WALLET_BALANCE: &str = "Filecoin.WalletBalance";
    pub const WALLET_LIST: &str = "Filecoin.WalletList";
}

pub mod state_api {
    pub const STATE_NETWORK_NAME: &str = "Filecoin.StateNetworkName";
    pub const STATE_NETWORK_VERSION: &str = "Filecoin.StateNetworkVersion";
    pub const STATE_ACCOUNT_KEY: &str = "Filecoin.StateAccountKey";
    pub const STATE_MINER_INFO: &str = "Filecoin.StateMinerInfo";
    pub const STATE_MINER_AVAILABLE_BALANCE: &str = "Filecoin.StateMinerAvailableBalance";
    pub const STATE_MINER_PROVING_DEADLINE: &str = "Filecoin.StateMinerProvingDeadline";
    pub const STATE_MINER_DEADLINES: &str = "Filecoin.StateMinerDeadlines";
    pub const STATE_MINER_PARTITIONS: &str = "Filecoin.StateMinerPartitions";
    pub const STATE_MARKET_STORAGE_DEAL: &str = "Filecoin.StateMarketStorageDeal";
}

pub mod miner_api {
    pub const ACTOR_ADDRESS: &str = "Filecoin.ActorAddress";
    pub const WORKER_STATS: &str = "Filecoin.WorkerStats";
    pub const WORKER_JOBS: &str = "Filecoin.WorkerJobs";
    pub const SECTORS_LIST: &str = "Filecoin.SectorsList";
    pub const SECTORS_STATUS: &str = "Filecoin.SectorsStatus";
}
