// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Client, RpcRequest};
use crate::error::ExporterError;
use crate::lotus_json::{ApiVersion, SectorInfo, WorkerJob, WorkerStats};
use crate::rpc_api::{StorageMinerApi, common_api::VERSION, miner_api::*};
use std::collections::BTreeMap;

#[async_trait::async_trait]
impl StorageMinerApi for Client {
    async fn actor_address(&self) -> Result<String, ExporterError> {
        self.call(RpcRequest::new(ACTOR_ADDRESS, ())).await
    }

    async fn version(&self) -> Result<ApiVersion, ExporterError> {
        self.call(RpcRequest::new(VERSION, ())).await
    }

    async fn worker_stats(&self) -> Result<BTreeMap<String, WorkerStats>, ExporterError> {
        self.call(RpcRequest::new(WORKER_STATS, ())).await
    }

    async fn worker_jobs(&self) -> Result<BTreeMap<String, Vec<WorkerJob>>, ExporterError> {
        self.call(RpcRequest::new(WORKER_JOBS, ())).await
    }

    async fn sectors_list(&self) -> Result<Vec<u64>, ExporterError> {
        let sectors: Option<Vec<u64>> = self.call(RpcRequest::new(SECTORS_LIST, ())).await?;
        Ok(sectors.unwrap_or_default())
    }

    async fn sectors_status(&self, sector: u64) -> Result<SectorInfo, ExporterError> {
        // `false`: skip the on-chain info, the sealing log is all we read
        self.call(RpcRequest::new(SECTORS_STATUS, (sector, false)))
            .await
    }
}
