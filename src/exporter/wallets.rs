// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Scrape, short_address};
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, MetricSection};

/// Balance of every local wallet, then the miner actor's available balance.
pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let mut balance = GaugeFamily::new("wallet_balance", "Wallet balance in FIL");
    for address in scrape.node.wallet_list().await? {
        let amount = scrape.node.wallet_balance(&address).await?;
        balance.push(
            scrape
                .labels()
                .with("address", &address)
                .with("short", short_address(&address)),
            amount.to_fil(),
        );
    }
    let available = scrape
        .node
        .state_miner_available_balance(scrape.miner_id())
        .await?;
    balance.push(
        scrape
            .labels()
            .with("address", scrape.miner_id())
            .with("short", scrape.miner_id()),
        available.to_fil(),
    );
    out.add(balance);
    Ok(())
}
