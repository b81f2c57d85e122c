//! Error types for `dex-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A remote request failed or returned a non-success status.
    #[error("remote unavailable: {url}: {reason}")]
    RemoteUnavailable { url: String, reason: String },

    /// One entry of a detail batch could not be resolved, so the whole
    /// batch was abandoned.
    #[error("detail batch {start}..{end} failed: {reason}")]
    DetailBatchFailed {
        start: usize,
        end: usize,
        reason: String,
    },

    /// A remote document was fetched but could not be decoded.
    #[error("could not decode {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The persisted favorites record is not a JSON array of identifiers.
    #[error("favorites data is corrupt: {0}")]
    PersistenceCorrupt(String),

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A navigable query string carried an unusable value.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Shorthand for building a [`CoreError::RemoteUnavailable`].
    pub fn remote(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::RemoteUnavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for failures caused by the remote API rather than local state.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable { .. } | Self::DetailBatchFailed { .. } | Self::Decode { .. }
        )
    }
}

/// Maps a file read error to the matching path-aware variant.
pub(crate) fn read_error(path: &std::path::Path, e: std::io::Error) -> CoreError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
        _ => CoreError::Io(e),
    }
}

/// Convenience alias used throughout `dex-core`.
pub type CoreResult<T> = Result<T, CoreError>;
