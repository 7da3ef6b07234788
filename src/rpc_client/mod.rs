// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod full_node_ops;
mod miner_ops;

use crate::error::ExporterError;
use anyhow::Context as _;
use http::{HeaderMap, HeaderValue, header};
use jsonrpsee::core::client::ClientT as _;
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use multiaddr::{Multiaddr, Protocol};
use serde::{Serialize, de::DeserializeOwned};
use std::{env, fmt, marker::PhantomData, str::FromStr, time::Duration};
use url::Url;

pub const FULLNODE_API_INFO_KEY: &str = "FULLNODE_API_INFO";
pub const MINER_API_INFO_KEY: &str = "MINER_API_INFO";
pub const DEFAULT_FULLNODE_MULTIADDR: &str = "/ip4/127.0.0.1/tcp/1234/http";
pub const DEFAULT_MINER_MULTIADDR: &str = "/ip4/127.0.0.1/tcp/2345/http";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Both the daemon and the miner serve the v0 API here.
const RPC_PATH: &str = "/rpc/v0";
const CONNECT: &str = "connect";

/// Token and endpoint of a Lotus API, in the `TOKEN:MULTIADDR` form that
/// `lotus auth api-info` prints. The token is optional.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiInfo {
    multiaddr: Multiaddr,
    url: Url,
    pub token: Option<String>,
}

impl fmt::Display for ApiInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = &self.token {
            token.fmt(f)?;
            write!(f, ":")?;
        }
        self.multiaddr.fmt(f)?;
        Ok(())
    }
}

// Keep tokens out of logs and panics.
impl fmt::Debug for ApiInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiInfo")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl FromStr for ApiInfo {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // An IPv6 multiaddr contains colons, but always starts with a slash.
        let (token, host) = match s.strip_prefix('/') {
            Some(_) => (None, s),
            None => match s.split_once(':') {
                Some((token, host)) => (Some(token), host),
                None => anyhow::bail!("expected TOKEN:MULTIADDR or MULTIADDR, got {s:?}"),
            },
        };
        if let Some(token) = token {
            HeaderValue::from_str(&bearer(token)).context("token is not a valid header value")?;
        }
        let multiaddr: Multiaddr = host
            .parse()
            .with_context(|| format!("invalid multiaddr {host:?}"))?;
        let mut url = multiaddr2url(&multiaddr).context("couldn't convert multiaddr to URL")?;
        url.set_path(RPC_PATH);
        Ok(ApiInfo {
            multiaddr,
            url,
            token: token.map(String::from),
        })
    }
}

impl ApiInfo {
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Read `key` from the environment, if set. Fails if the variable is
    /// malformed.
    pub fn from_env(key: &str) -> anyhow::Result<Option<Self>> {
        match env::var(key) {
            Ok(it) => it
                .parse()
                .map(Some)
                .with_context(|| format!("couldn't parse {key}")),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(it @ env::VarError::NotUnicode(_)) => Err(it.into()),
        }
    }

    pub fn default_full_node() -> Self {
        Self::from_default(DEFAULT_FULLNODE_MULTIADDR)
    }

    pub fn default_miner() -> Self {
        Self::from_default(DEFAULT_MINER_MULTIADDR)
    }

    fn from_default(multiaddr: &'static str) -> Self {
        // both defaults are covered by `default_api_infos_parse`
        multiaddr.parse().unwrap()
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// An `RpcRequest` is an at-rest description of a remote procedure call. It can
/// be invoked using [`Client::call`].
#[derive(Debug, Clone)]
pub struct RpcRequest<T = serde_json::Value> {
    pub method_name: &'static str,
    pub params: serde_json::Value,
    pub result_type: PhantomData<fn() -> T>,
}

impl<T> RpcRequest<T> {
    /// `params` is a tuple of positional parameters, `()` for none.
    pub fn new<P: Serialize>(method_name: &'static str, params: P) -> Self {
        let params = match serde_json::to_value(params) {
            Ok(serde_json::Value::Null) => serde_json::Value::Array(vec![]),
            Ok(it @ serde_json::Value::Array(_)) => it,
            Ok(it) => serde_json::Value::Array(vec![it]),
            Err(_) => serde_json::Value::String(
                "INTERNAL ERROR: Parameters could not be serialized as JSON".to_string(),
            ),
        };
        RpcRequest {
            method_name,
            params,
            result_type: PhantomData,
        }
    }
}

impl<T> ToRpcParams for RpcRequest<T> {
    fn to_rpc_params(self) -> Result<Option<Box<serde_json::value::RawValue>>, serde_json::Error> {
        Ok(Some(serde_json::value::to_raw_value(&self.params)?))
    }
}

/// A connected JSON-RPC client for one Lotus endpoint.
pub struct Client {
    url: Url,
    inner: ClientInner,
}

enum ClientInner {
    Ws(WsClient),
    Https(HttpClient),
}

impl Client {
    /// Build a client for `api_info`. For `ws`/`wss` endpoints this opens the
    /// connection, so an unreachable node fails here.
    pub async fn connect(api_info: &ApiInfo, timeout: Duration) -> Result<Self, ExporterError> {
        let url = api_info.url.clone();
        let headers = match &api_info.token {
            Some(token) => HeaderMap::from_iter([(
                header::AUTHORIZATION,
                HeaderValue::from_str(&bearer(token)).map_err(|e| ExporterError::Rpc {
                    method: CONNECT,
                    reason: format!("invalid authorization token: {e}"),
                })?,
            )]),
            None => HeaderMap::default(),
        };
        let inner = match url.scheme() {
            "ws" | "wss" => ClientInner::Ws(
                WsClientBuilder::default()
                    .set_headers(headers)
                    .request_timeout(timeout)
                    .build(url.as_str())
                    .await
                    .map_err(|e| ExporterError::from_client_error(CONNECT, e))?,
            ),
            "http" | "https" => ClientInner::Https(
                HttpClientBuilder::default()
                    .set_headers(headers)
                    .request_timeout(timeout)
                    .build(url.as_str())
                    .map_err(|e| ExporterError::from_client_error(CONNECT, e))?,
            ),
            it => {
                return Err(ExporterError::Rpc {
                    method: CONNECT,
                    reason: format!("unsupported URL scheme: {it}"),
                });
            }
        };
        Ok(Self { url, inner })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn call<T: DeserializeOwned>(&self, req: RpcRequest<T>) -> Result<T, ExporterError> {
        let method = req.method_name;
        tracing::debug!(url = %self.url, "calling {method}");
        let result = match &self.inner {
            ClientInner::Ws(it) => it.request(method, req).await,
            ClientInner::Https(it) => it.request(method, req).await,
        };
        result.map_err(|e| ExporterError::from_client_error(method, e))
    }
}

/// `"/dns/example.com/tcp/8080/http" -> "http://example.com:8080/"`
///
/// Returns [`None`] on unsupported formats, or if there is a URL parsing error.
/// A multiaddr that stops after the port is taken to mean `http`, which is how
/// Lotus itself dials its API addresses.
///
/// Note that [`Multiaddr`]s do NOT support a (URL) `path`, so that must be handled
/// out-of-band.
fn multiaddr2url(m: &Multiaddr) -> Option<Url> {
    let mut components = m.iter().peekable();
    let host = match components.next()? {
        Protocol::Dns(it) | Protocol::Dns4(it) | Protocol::Dns6(it) | Protocol::Dnsaddr(it) => {
            it.to_string()
        }
        Protocol::Ip4(it) => it.to_string(),
        Protocol::Ip6(it) => format!("[{it}]"),
        _ => return None,
    };
    let port = components
        .next_if(|it| matches!(it, Protocol::Tcp(_)))
        .map(|it| match it {
            Protocol::Tcp(port) => port,
            _ => unreachable!(),
        });
    let scheme = match components.next() {
        None => "http",
        Some(Protocol::Http) => "http",
        Some(Protocol::Https) => "https",
        Some(Protocol::Ws(it)) if it == "/" => "ws",
        Some(Protocol::Wss(it)) if it == "/" => "wss",
        _ => return None,
    };
    let None = components.next() else { return None };
    let parse_me = match port {
        Some(port) => format!("{scheme}://{host}:{port}"),
        None => format!("{scheme}://{host}"),
    };
    parse_me.parse().ok()
}
