//! Error types shared by the core and the gateway adapter.

use thiserror::Error;

/// Failure talking to the chat platform (send, edit, role grant, lookup).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("platform request failed: {0}")]
    Request(String),
    #[error("invalid platform identifier: {0}")]
    InvalidId(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Failure from the completion provider. Every variant is the "Failure" signal of the bridge.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion provider {0}: {1}")]
    Status(u16, String),
    #[error("completion response parse: {0}")]
    Malformed(String),
    #[error("completion response contained no choices")]
    Empty,
}

/// Failure inside a command handler. Caught at the dispatch boundary.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}
