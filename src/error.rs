//! Error type shared by generation, serialization, and file output.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while building or writing a map.
///
/// Generation either produces a complete grid or one of these; nothing is
/// written to disk until generation and serialization have both succeeded.
#[derive(Error, Debug)]
pub enum MapError {
    /// A configuration value is out of range (e.g. `size == 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The row generator or the closure check disagreed with the geometry.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Creating the output directory or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be parsed.
    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize map: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write preview: {0}")]
    Preview(#[from] image::ImageError),
}
