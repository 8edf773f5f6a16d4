//! Error types for the merge crate.

use std::path::PathBuf;

use symfarm_types::FarmPath;

/// Why a conflict handler declined to pick a winner.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// The handler does not resolve file conflicts at all.
    #[error("unresolvable conflict between two or more files")]
    Unresolvable,

    /// A custom handler refused, with its own reason.
    #[error("conflict declined: {0}")]
    Declined(String),
}

/// Errors that abort merge resolution. No actions are returned alongside them.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The path is a directory in some source trees and not in others.
    #[error("file vs directory conflict at {path}: directories {directories:?}, files {files:?}")]
    FileDirectoryConflict {
        path: FarmPath,
        directories: Vec<PathBuf>,
        files: Vec<PathBuf>,
    },

    /// Two or more files compete for the path and the handler refused.
    #[error("unresolvable conflict at {path} between {candidates:?}: {source}")]
    UnresolvableConflict {
        path: FarmPath,
        candidates: Vec<PathBuf>,
        #[source]
        source: ConflictError,
    },
}

impl MergeError {
    /// The farm path the conflict was found at.
    pub fn path(&self) -> &FarmPath {
        match self {
            MergeError::FileDirectoryConflict { path, .. }
            | MergeError::UnresolvableConflict { path, .. } => path,
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
