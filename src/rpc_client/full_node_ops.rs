// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Client, RpcRequest};
use crate::error::ExporterError;
use crate::lotus_json::{
    ApiDeadline, ApiVersion, DeadlineInfo, HeadTipset, MarketDeal, MinerInfo, MinerPartition,
    SignedMessage, Tipset, TokenAmount,
};
use crate::rpc_api::{
    FullNodeApi, chain_api::*, common_api::*, mpool_api::*, state_api::*, wallet_api::*,
};

#[async_trait::async_trait]
impl FullNodeApi for Client {
    async fn version(&self) -> Result<ApiVersion, ExporterError> {
        self.call(RpcRequest::new(VERSION, ())).await
    }

    async fn chain_head(&self) -> Result<Tipset, ExporterError> {
        self.call(RpcRequest::new(CHAIN_HEAD, ())).await
    }

    async fn wallet_list(&self) -> Result<Vec<String>, ExporterError> {
        self.call(RpcRequest::new(WALLET_LIST, ())).await
    }

    async fn wallet_balance(&self, address: &str) -> Result<TokenAmount, ExporterError> {
        self.call(RpcRequest::new(WALLET_BALANCE, (address,))).await
    }

    async fn mpool_pending(&self) -> Result<Vec<SignedMessage>, ExporterError> {
        // `null` when the pool is empty
        let pending: Option<Vec<SignedMessage>> = self
            .call(RpcRequest::new(MPOOL_PENDING, (HeadTipset,)))
            .await?;
        Ok(pending.unwrap_or_default())
    }

    async fn state_network_name(&self) -> Result<String, ExporterError> {
        self.call(RpcRequest::new(STATE_NETWORK_NAME, ())).await
    }

    async fn state_network_version(&self) -> Result<u64, ExporterError> {
        self.call(RpcRequest::new(STATE_NETWORK_VERSION, (HeadTipset,)))
            .await
    }

    async fn state_account_key(&self, address: &str) -> Result<String, ExporterError> {
        self.call(RpcRequest::new(STATE_ACCOUNT_KEY, (address, HeadTipset)))
            .await
    }

    async fn state_miner_info(&self, miner: &str) -> Result<MinerInfo, ExporterError> {
        self.call(RpcRequest::new(STATE_MINER_INFO, (miner, HeadTipset)))
            .await
    }

    async fn state_miner_available_balance(
        &self,
        miner: &str,
    ) -> Result<TokenAmount, ExporterError> {
        self.call(RpcRequest::new(
            STATE_MINER_AVAILABLE_BALANCE,
            (miner, HeadTipset),
        ))
        .await
    }

    async fn state_miner_proving_deadline(
        &self,
        miner: &str,
    ) -> Result<DeadlineInfo, ExporterError> {
        self.call(RpcRequest::new(
            STATE_MINER_PROVING_DEADLINE,
            (miner, HeadTipset),
        ))
        .await
    }

    async fn state_miner_deadlines(&self, miner: &str) -> Result<Vec<ApiDeadline>, ExporterError> {
        self.call(RpcRequest::new(STATE_MINER_DEADLINES, (miner, HeadTipset)))
            .await
    }

    async fn state_miner_partitions(
        &self,
        miner: &str,
        deadline_index: u64,
    ) -> Result<Option<Vec<MinerPartition>>, ExporterError> {
        self.call(RpcRequest::new(
            STATE_MINER_PARTITIONS,
            (miner, deadline_index, HeadTipset),
        ))
        .await
    }

    async fn state_market_storage_deal(&self, deal_id: u64) -> Result<MarketDeal, ExporterError> {
        self.call(RpcRequest::new(
            STATE_MARKET_STORAGE_DEAL,
            (deal_id, HeadTipset),
        ))
        .await
    }
}
