//! Errors surfaced by the filter.
//!
//! Configuration *values* never produce errors (they fall back to defaults);
//! only structurally broken input and I/O failures do.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    /// stdin (or `--input`) was not a pandoc JSON document.
    #[error("invalid pandoc JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A node carried a known tag but an unexpected payload shape.
    #[error("malformed {tag} node: {message}")]
    MalformedNode { tag: String, message: String },

    /// The `--config` file could not be parsed as YAML.
    #[error("failed to parse config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    pub(crate) fn malformed(tag: &str, message: impl Into<String>) -> Self {
        FilterError::MalformedNode {
            tag: tag.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
