//! Error types for cache persistence.

use std::path::PathBuf;

/// Errors that can occur while writing the cache file.
///
/// Reads never produce these: loading is fail-safe, and any problem with
/// an existing cache file is treated as a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while writing the cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
