// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use jsonrpsee::core::ClientError;

/// Everything that can stop a scrape.
///
/// None of these are retried: the exporter renders whatever it collected before
/// the failure and exits, and the next scrape starts from scratch.
#[derive(Debug, thiserror::Error)]
pub enum ExporterError {
    /// The node could not be reached, or the transport gave up on the request.
    #[error("{method}: node unavailable: {reason}")]
    Unavailable { method: &'static str, reason: String },
    /// The node answered, but the requested actor is unknown.
    #[error("{method}: not found: {reason}")]
    NotFound { method: &'static str, reason: String },
    /// A sector set could not be counted.
    #[error("malformed sector set: {0}")]
    MalformedSet(String),
    /// `StateMinerDeadlines` has no entry for a deadline we walked to.
    #[error("no deadline data for deadline index {index}")]
    MissingData { index: u64 },
    #[error("malformed proving schedule: {0}")]
    MalformedSchedule(String),
    /// Any other JSON-RPC error object.
    #[error("{method}: {reason}")]
    Rpc { method: &'static str, reason: String },
    #[error("{method}: unexpected response: {reason}")]
    Decode { method: &'static str, reason: String },
}

impl ExporterError {
    /// Sort a [`ClientError`] into the taxonomy above.
    pub fn from_client_error(method: &'static str, error: ClientError) -> Self {
        match error {
            ClientError::Call(it) => {
                let reason = it.message().to_owned();
                if is_not_found(&reason) {
                    ExporterError::NotFound { method, reason }
                } else {
                    ExporterError::Rpc { method, reason }
                }
            }
            ClientError::ParseError(e) => ExporterError::Decode {
                method,
                reason: e.to_string(),
            },
            e @ (ClientError::Transport(_)
            | ClientError::RestartNeeded(_)
            | ClientError::RequestTimeout) => ExporterError::Unavailable {
                method,
                reason: e.to_string(),
            },
            other => ExporterError::Rpc {
                method,
                reason: other.to_string(),
            },
        }
    }

    /// Whether this failure came from the node being unreachable, as opposed
    /// to the node answering with something we can't use.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ExporterError::Unavailable { .. })
    }
}

// Lotus wraps the actor lookup failure in several layers of context, e.g.
// `resolution lookup failed (f01234): resolve address f01234: actor not found`.
fn is_not_found(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("actor not found") || message.ends_with("not found")
}
