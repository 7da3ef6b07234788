// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ffi::OsString;
use std::io::Write as _;

use crate::cli_shared::cli::{CliOpts, Config};
use crate::cli_shared::logger;
use crate::error::ExporterError;
use crate::exporter::Exporter;
use crate::metrics::Exposition;
use crate::rpc_client::Client;
use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{debug, info, warn};

/// Scrape once, print the metrics, and fail if the scrape didn't complete.
/// Whatever was collected before a failure is still printed.
pub async fn main<ArgT>(args: impl IntoIterator<Item = ArgT>) -> anyhow::Result<()>
where
    ArgT: Into<OsString> + Clone,
{
    // Capture Cli inputs
    let opts = CliOpts::parse_from(args);
    logger::setup_logger(&opts);

    let (config, path) = opts.to_config().context("Error parsing config")?;
    match &path {
        Some(path) => info!("config loaded: {path}"),
        None => debug!("using the default config"),
    }

    let started_at = Utc::now();
    let mut exposition = Exposition::new(&config.namespace);
    let result = scrape(&config, started_at, &mut exposition).await;

    let metrics = exposition.render().context("couldn't encode metrics")?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(metrics.as_bytes())?;
    stdout.flush()?;

    if let Err(e) = &result
        && e.is_unavailable()
    {
        warn!("Lotus API unreachable, check FULLNODE_API_INFO and MINER_API_INFO");
    }
    result.context("scrape failed")
}

async fn scrape(
    config: &Config,
    started_at: DateTime<Utc>,
    exposition: &mut Exposition,
) -> Result<(), ExporterError> {
    let node = Client::connect(&config.api.full_node, config.request_timeout).await?;
    let miner = Client::connect(&config.api.miner, config.request_timeout).await?;
    debug!(node = %node.url(), miner = %miner.url(), "connected");
    Exporter::new(&node, &miner, config.exporter_config(), started_at)
        .collect(exposition)
        .await
}
