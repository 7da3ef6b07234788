// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, MetricSection};

pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let head = scrape.node.chain_head().await?;
    let mut height = GaugeFamily::new("chain_height", "Height of the chain head");
    height.push(scrape.labels(), head.height);
    out.add(height);
    Ok(())
}
