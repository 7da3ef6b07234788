// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::Scrape;
use crate::error::ExporterError;
use crate::metrics::{GaugeFamily, MetricSection};

pub(super) async fn collect(
    scrape: &Scrape<'_>,
    out: &mut MetricSection,
) -> Result<(), ExporterError> {
    let network = scrape.node.state_network_name().await?;
    let network_version = scrape.node.state_network_version().await?;
    let version = scrape.node.version().await?;
    let mut info = GaugeFamily::new(
        "info",
        "Daemon version and network, value is the network version",
    );
    info.push(
        scrape
            .labels()
            .with("version", &version.version)
            .with("network", &network),
        network_version,
    );
    out.add(info);
    Ok(())
}
