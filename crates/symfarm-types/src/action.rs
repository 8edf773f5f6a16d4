//! Actions the resolver emits and the executor performs.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::path::FarmPath;

/// What to create at a farm path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Create an empty directory.
    MakeDirectory,
    /// Create a link pointing at a file in a source tree.
    MakeLink,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::MakeDirectory => f.write_str("mkdir"),
            ActionKind::MakeLink => f.write_str("link"),
        }
    }
}

/// A single creation step for the farm.
///
/// `link_target` is `Some` exactly when `kind` is [`ActionKind::MakeLink`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub path: FarmPath,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<PathBuf>,
}

impl PendingAction {
    pub fn make_directory(path: FarmPath) -> Self {
        Self {
            path,
            kind: ActionKind::MakeDirectory,
            link_target: None,
        }
    }

    pub fn make_link(path: FarmPath, origin: impl Into<PathBuf>) -> Self {
        Self {
            path,
            kind: ActionKind::MakeLink,
            link_target: Some(origin.into()),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == ActionKind::MakeDirectory
    }

    pub fn is_link(&self) -> bool {
        self.kind == ActionKind::MakeLink
    }

    /// Where this action lands beneath the farm root.
    pub fn location_in(&self, target_root: &Path) -> PathBuf {
        self.path.to_path_under(target_root)
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link_target {
            Some(origin) => write!(f, "{} {} -> {}", self.kind, self.path, origin.display()),
            None => write!(f, "{} {}", self.kind, self.path),
        }
    }
}
