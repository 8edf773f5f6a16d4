use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FarmError {
    #[error("target directory exists and is not empty: {0}")]
    TargetExists(PathBuf),

    #[error("scan failed: {0}")]
    Scan(#[from] symfarm_scan::ScanError),

    #[error("merge failed: {0}")]
    Merge(#[from] symfarm_merge::MergeError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FarmError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FarmError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_target_exists(&self) -> bool {
        matches!(self, FarmError::TargetExists(_))
    }

    pub fn is_file_directory_conflict(&self) -> bool {
        matches!(
            self,
            FarmError::Merge(symfarm_merge::MergeError::FileDirectoryConflict { .. })
        )
    }

    pub fn is_unresolvable_conflict(&self) -> bool {
        matches!(
            self,
            FarmError::Merge(symfarm_merge::MergeError::UnresolvableConflict { .. })
        )
    }
}

pub type FarmResult<T> = Result<T, FarmError>;
