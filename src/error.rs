//! Error types for each stage of the briefing pipeline.
//!
//! Collector and synthesizer failures ([`ServiceError`]) never leave their
//! stage: they are turned into degraded output at the stage boundary.
//! [`DispatchError`] is returned to the orchestrator, which decides the
//! fallback. [`ConfigError`] aborts the run before any stage starts.

use thiserror::Error;

/// Problems found while turning CLI/environment input into a [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid URL for {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("failed to read queries file {path}: {source}")]
    QueriesRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse queries file {path}: {source}")]
    QueriesParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid queries: {0}")]
    InvalidQueries(String),
}

/// Failure of a single call to the search or generation HTTP API.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response contained no text content")]
    EmptyContent,
}

/// Failure to build or submit the briefing email.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid {role} address {address:?}: {source}")]
    Address {
        role: &'static str,
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP submission failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
