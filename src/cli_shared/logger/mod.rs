// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, Registry, prelude::*};

use crate::cli_shared::cli::CliOpts;

/// Everything goes to `stderr`: `stdout` carries the metrics.
pub fn setup_logger(opts: &CliOpts) {
    let console = tracing_subscriber::fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_ansi(opts.color.coloring_enabled());
    let layers: Vec<Box<dyn tracing_subscriber::layer::Layer<Registry> + Send + Sync>> =
        if opts.log_json {
            vec![Box::new(
                console
                    .json()
                    .with_filter(get_env_filter(default_env_filter())),
            )]
        } else {
            vec![Box::new(
                console.with_filter(get_env_filter(default_env_filter())),
            )]
        };
    tracing_subscriber::registry().with(layers).init();
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable, or a default
/// - see [`default_env_filter`]
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

fn default_env_filter() -> EnvFilter {
    let default_directives = ["warn", "lotus_exporter=info", "jsonrpsee=warn"];
    EnvFilter::try_new(default_directives.join(",")).unwrap()
}

#[test]
fn test_default_env_filter() {
    let _did_not_panic = default_env_filter();
}
