// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::cli_shared::read_config;
use crate::deadlines::EPOCH_DURATION_SECONDS;
use crate::exporter::{Collectors, ExporterConfig};
use crate::rpc_client::{ApiInfo, DEFAULT_TIMEOUT, FULLNODE_API_INFO_KEY, MINER_API_INFO_KEY};
use crate::utils::misc::LoggingColor;
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, DurationSeconds, serde_as};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the config file.
pub const CONFIG_PATH_KEY: &str = "LOTUS_EXPORTER_CONFIG";
pub const DEFAULT_NAMESPACE: &str = "lotus";

/// Scrape a Lotus daemon and storage miner once and print the metrics to stdout.
#[derive(Default, Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct CliOpts {
    /// A TOML file containing relevant configurations
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// `TOKEN:MULTIADDR` of the Lotus daemon. Overrides `FULLNODE_API_INFO`
    #[arg(long)]
    pub fullnode_api_info: Option<ApiInfo>,
    /// `TOKEN:MULTIADDR` of the storage miner. Overrides `MINER_API_INFO`
    #[arg(long)]
    pub miner_api_info: Option<ApiInfo>,
    /// Prefix of every metric name
    #[arg(long)]
    pub namespace: Option<String>,
    /// Enable or disable colored logging in `stderr`
    #[arg(long, default_value = "auto")]
    pub color: LoggingColor,
    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliOpts {
    /// File, then environment, then flags.
    pub fn to_config(&self) -> anyhow::Result<(Config, Option<ConfigPath>)> {
        let (path, config) = read_config(self.config.as_ref())?;
        let config = self.merge(config, ApiEnv::from_env()?);
        anyhow::ensure!(
            config.epoch_duration_seconds > 0,
            "epoch_duration_seconds must be positive, got {}",
            config.epoch_duration_seconds
        );
        Ok((config, path))
    }

    fn merge(&self, mut config: Config, env: ApiEnv) -> Config {
        if let Some(full_node) = self.fullnode_api_info.clone().or(env.full_node) {
            config.api.full_node = full_node;
        }
        if let Some(miner) = self.miner_api_info.clone().or(env.miner) {
            config.api.miner = miner;
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        config
    }
}

/// API info from `FULLNODE_API_INFO` and `MINER_API_INFO`.
#[derive(Debug, Default)]
struct ApiEnv {
    full_node: Option<ApiInfo>,
    miner: Option<ApiInfo>,
}

impl ApiEnv {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            full_node: ApiInfo::from_env(FULLNODE_API_INFO_KEY)?,
            miner: ApiInfo::from_env(MINER_API_INFO_KEY)?,
        })
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub namespace: String,
    pub epoch_duration_seconds: i64,
    /// Overrides the local hostname in the `miner_host` label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miner_host: Option<String>,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub request_timeout: Duration,
    pub api: ApiConfig,
    pub collectors: Collectors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.into(),
            epoch_duration_seconds: EPOCH_DURATION_SECONDS,
            miner_host: None,
            request_timeout: DEFAULT_TIMEOUT,
            api: ApiConfig::default(),
            collectors: Collectors::default(),
        }
    }
}

impl Config {
    pub fn exporter_config(&self) -> ExporterConfig {
        ExporterConfig {
            epoch_duration_seconds: self.epoch_duration_seconds,
            miner_host: self.miner_host.clone(),
            collectors: self.collectors,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub full_node: ApiInfo,
    #[serde_as(as = "DisplayFromStr")]
    pub miner: ApiInfo,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            full_node: ApiInfo::default_full_node(),
            miner: ApiInfo::default_miner(),
        }
    }
}

/// Where the config file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPath {
    Cli(PathBuf),
    Env(PathBuf),
    Project(PathBuf),
}

impl ConfigPath {
    pub fn to_path_buf(&self) -> &PathBuf {
        match self {
            ConfigPath::Cli(path) | ConfigPath::Env(path) | ConfigPath::Project(path) => path,
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigPath::Cli(path) => write!(f, "{} (--config)", path.display()),
            ConfigPath::Env(path) => write!(f, "{} ({CONFIG_PATH_KEY})", path.display()),
            ConfigPath::Project(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn find_config_path(config: Option<&PathBuf>) -> Option<ConfigPath> {
    if let Some(path) = config {
        return Some(ConfigPath::Cli(path.to_owned()));
    }
    if let Some(path) = std::env::var_os(CONFIG_PATH_KEY) {
        return Some(ConfigPath::Env(PathBuf::from(path)));
    }
    if let Some(dirs) = ProjectDirs::from("io", "Filecoin", "lotus-exporter") {
        let path = dirs.config_dir().join("config.toml");
        if path.exists() {
            return Some(ConfigPath::Project(path));
        }
    }
    None
}

impl AsRef<Path> for ConfigPath {
    fn as_ref(&self) -> &Path {
        self.to_path_buf()
    }
}
