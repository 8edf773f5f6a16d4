//! Error types for the scan crate.

use std::path::PathBuf;

use symfarm_types::TypeError;

/// Errors that abort a scan. Every variant names the source tree involved.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Walking the tree failed (unreadable directory, vanished entry, ...).
    #[error("failed to walk source tree {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The walker yielded an entry that is not beneath its root.
    #[error("entry {path} is outside source tree {root}")]
    OutsideRoot { root: PathBuf, path: PathBuf },

    /// An entry's relative path cannot be expressed as a farm path.
    #[error("unusable path in source tree {root}: {source}")]
    InvalidPath {
        root: PathBuf,
        #[source]
        source: TypeError,
    },
}

impl ScanError {
    /// The source tree root the error is tagged with.
    pub fn root(&self) -> &PathBuf {
        match self {
            ScanError::Walk { root, .. }
            | ScanError::OutsideRoot { root, .. }
            | ScanError::InvalidPath { root, .. } => root,
        }
    }
}

/// Convenience alias for scan results.
pub type ScanResult<T> = Result<T, ScanError>;
