// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod cli;
pub mod logger;

use crate::cli_shared::cli::{Config, ConfigPath, find_config_path};
use anyhow::Context as _;
use std::path::PathBuf;

pub fn read_config(
    config_path_opt: Option<&PathBuf>,
) -> anyhow::Result<(Option<ConfigPath>, Config)> {
    let (path, config) = match find_config_path(config_path_opt) {
        Some(path) => {
            // Read from config file
            let toml = std::fs::read_to_string(&path)
                .with_context(|| format!("couldn't read config file {path}"))?;
            // Parse and return the configuration file
            let config: Config =
                toml::from_str(&toml).with_context(|| format!("invalid config file {path}"))?;
            (Some(path), config)
        }
        None => (None, Config::default()),
    };
    Ok((path, config))
}
