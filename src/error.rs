//! Error types for the model walk, the Honeycomb sync and CLI configuration
//!
//! Every variant carries enough context (path, dataset, column) for the
//! binary to print a single terminating message.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading semantic-convention definitions
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to traverse {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ModelError {
    /// Path of the file or directory that caused the failure
    pub fn path(&self) -> &std::path::Path {
        match self {
            ModelError::Traversal { path, .. }
            | ModelError::Read { path, .. }
            | ModelError::Parse { path, .. } => path,
        }
    }
}

/// Failures talking to the Honeycomb API
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed while {context}: {source}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Honeycomb API returned {status} while {context}: {body}")]
    Status {
        status: reqwest::StatusCode,
        context: String,
        body: String,
    },

    #[error("Failed to decode response while {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("API URL cannot be used as a base: {0}")]
    BaseUrl(String),

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("Failed to sync column '{column}' in dataset '{dataset}': {source}")]
    Column {
        dataset: String,
        column: String,
        #[source]
        source: Box<SyncError>,
    },

    #[error("Failed to list columns for dataset '{dataset}': {source}")]
    Dataset {
        dataset: String,
        #[source]
        source: Box<SyncError>,
    },
}

/// Invalid command line / environment configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing: Honeycomb API Key (set --honeycomb-api-key or HONEYCOMB_API_KEY)")]
    MissingApiKey,

    #[error("no semantic model paths given")]
    NoModelPaths,

    #[error("invalid Honeycomb API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}
