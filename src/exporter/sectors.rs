// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::error::ExporterError;
use crate::lotus_json::{MarketDeal, SectorInfo};
use crate::metrics::{GaugeFamily, Labels, MetricSection};

/// Sectors in these states have their deals on chain already.
const SETTLED_STATES: [&str; 2] = ["Proving", "Removed"];

const UNKNOWN: &str = "unknown";

pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let mut state = GaugeFamily::new("miner_sector_state", "Sector state, value is always 1");
    let mut event = GaugeFamily::new(
        "miner_sector_event",
        "Sector lifecycle event, value is its unix timestamp",
    );
    let mut deals = GaugeFamily::new(
        "miner_sector_sealing_deals_info",
        "Deal in a sector that is not yet proving, value is always 1",
    );

    for sector_number in scrape.miner.sectors_list().await? {
        let sector = scrape.miner.sectors_status(sector_number).await?;
        let labels = scrape.labels().with("sector_id", sector_number);

        state.push(
            labels
                .clone()
                .with("state", &sector.state)
                .with("pledged", u8::from(sector.is_pledged()))
                .with("deals", sector.deal_ids().count())
                .with("verified_weight", &sector.verified_deal_weight),
            1u64,
        );
        for (event_type, timestamp) in [
            ("creation", sector.created_at()),
            ("packed", sector.packed_at()),
            ("finalized", sector.finalized_at()),
        ] {
            if let Some(timestamp) = timestamp {
                event.push(labels.clone().with("event_type", event_type), timestamp);
            }
        }

        if !SETTLED_STATES.contains(&sector.state.as_str()) {
            push_deals(scrape, &mut deals, &labels, &sector).await;
        }
    }

    out.add(state).add(event).add(deals);
    Ok(())
}

/// A failed deal lookup is reported with `unknown` fields rather than failing
/// the section.
async fn push_deals(
    scrape: &Scrape<'_>,
    family: &mut GaugeFamily,
    sector_labels: &Labels,
    sector: &SectorInfo,
) {
    for deal_id in sector.deal_ids() {
        let labels = sector_labels.clone().with("deal_id", deal_id);
        let labels = match scrape.node.state_market_storage_deal(deal_id).await {
            Ok(deal) => with_deal(labels, &deal),
            Err(e) => {
                tracing::warn!(deal_id, "deal lookup failed: {e}");
                [
                    "deal_is_verified",
                    "deal_slash_epoch",
                    "deal_price_per_epoch",
                    "deal_provider_collateral",
                    "deal_client_collateral",
                    "deal_size",
                    "deal_start_epoch",
                    "deal_end_epoch",
                ]
                .into_iter()
                .fold(labels, |labels, key| labels.with(key, UNKNOWN))
            }
        };
        family.push(labels, 1u64);
    }
}

fn with_deal(labels: Labels, deal: &MarketDeal) -> Labels {
    let proposal = &deal.proposal;
    labels
        .with("deal_is_verified", proposal.verified_deal)
        .with("deal_slash_epoch", deal.state.slash_epoch)
        .with("deal_price_per_epoch", proposal.storage_price_per_epoch.atto())
        .with("deal_provider_collateral", proposal.provider_collateral.atto())
        .with("deal_client_collateral", proposal.client_collateral.atto())
        .with("deal_size", proposal.piece_size)
        .with("deal_start_epoch", proposal.start_epoch)
        .with("deal_end_epoch", proposal.end_epoch)
}
