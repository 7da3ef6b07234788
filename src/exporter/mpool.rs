// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::miner_info::MinerRoles;
use super::{Scrape, short_address};
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, MetricSection};
use std::collections::HashSet;

/// Pending messages, and details of the ones sent from local wallets.
pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let pending = scrape.node.mpool_pending().await?;
    let wallets = scrape
        .node
        .wallet_list()
        .await?
        .into_iter()
        .collect::<HashSet<_>>();
    let roles = MinerRoles::fetch(scrape.node, scrape.miner_id()).await?;

    let mut local_messages = GaugeFamily::new(
        "mpool_local_message",
        "Pending message sent from a local wallet, value is always 1",
    );
    for message in pending.iter().map(|it| &it.message) {
        if !wallets.contains(&message.from) {
            continue;
        }
        let from = match roles.role_of(&message.from) {
            Some(role) => role.to_owned(),
            None => short_address(&message.from),
        };
        local_messages.push(
            scrape
                .labels()
                .with("from", from)
                .with("to", &message.to)
                .with("nonce", message.nonce)
                .with("value", message.value.atto())
                .with("gaslimit", message.gas_limit)
                .with("gasfeecap", message.gas_fee_cap.atto())
                .with("gaspremium", message.gas_premium.atto())
                .with("method", message.method),
            1u64,
        );
    }

    let mut total = GaugeFamily::new("mpool_total", "Number of pending messages in the mpool");
    total.push(scrape.labels(), pending.len());
    let mut local_total = GaugeFamily::new(
        "mpool_local_total",
        "Number of pending messages sent from local wallets",
    );
    local_total.push(scrape.labels(), local_messages.samples().len());
    out.add(total).add(local_total).add(local_messages);
    Ok(())
}
