//! Core error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding, aggregating or describing click curves
#[derive(Error, Debug)]
pub enum CoreError {
    /// Container file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Container file is not a valid result container
    #[error("failed to decode result container {}: {source}", path.display())]
    Decode {
        /// Offending file
        path: PathBuf,
        /// Underlying JSON failure
        #[source]
        source: serde_json::Error,
    },

    /// Container holds no per-image sequences
    #[error("result container for {model} on {dataset} holds no images")]
    EmptyContainer {
        /// Dataset name
        dataset: String,
        /// Model name
        model: String,
    },

    /// Per-image sequences of one container differ in length
    #[error("image {image} has {found} clicks, expected {expected}")]
    RaggedSequences {
        /// Index of the first image whose length differs
        image: usize,
        /// Length of the first image
        expected: usize,
        /// Length of the offending image
        found: usize,
    },

    /// Dataset has no entry in the axis-range table
    #[error("no axis range configured for dataset '{0}'")]
    MissingAxisRange(String),

    /// Color or line style could not be parsed
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// Axis range with a non-positive step or an empty span
    #[error("invalid axis range: {0}")]
    InvalidAxisRange(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
