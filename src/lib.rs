// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! A one-shot Prometheus exporter for a Lotus daemon and storage miner.
//!
//! Each run connects to both APIs, walks the chain, wallet, worker, sector
//! and proving-deadline state of the miner, and prints the result to stdout
//! in the OpenMetrics text format. It is meant to be invoked once per scrape
//! by an external agent, e.g. a node-exporter textfile collector.

mod cli;
mod cli_shared;
mod deadlines;
mod error;
mod exporter;
mod lotus_json;
mod metrics;
mod rpc_api;
mod rpc_client;
#[cfg(test)]
mod test_utils;
mod utils;

pub use cli::main::main as exporter_main;
pub use cli_shared::cli::Config;
pub use deadlines::{DeadlineAggregate, ProvingSchedule};
pub use error::ExporterError;
