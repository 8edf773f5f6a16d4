//! File vs file conflict policies.
//!
//! A [`ConflictHandler`] is consulted only when two or more source trees
//! contribute a non-directory at the same farm path. It receives the origin
//! paths in source order and either names the winner, asks for nothing to be
//! created, or refuses.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConflictError;

/// Outcome of a conflict handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Link the farm path to this origin.
    Link(PathBuf),
    /// Create nothing at this farm path.
    Skip,
}

impl Resolution {
    /// The chosen origin, or `None` when nothing should be created.
    ///
    /// An empty chosen path means the same as [`Resolution::Skip`].
    pub fn chosen(&self) -> Option<&Path> {
        match self {
            Resolution::Link(origin) if !origin.as_os_str().is_empty() => Some(origin),
            _ => None,
        }
    }
}

/// Picks the winning origin among competing files.
///
/// Any `Fn(&[PathBuf]) -> Result<Resolution, ConflictError>` closure is a
/// handler.
pub trait ConflictHandler {
    /// `candidates` holds at least two origins, in source tree order.
    fn resolve(&self, candidates: &[PathBuf]) -> Result<Resolution, ConflictError>;
}

impl<F> ConflictHandler for F
where
    F: Fn(&[PathBuf]) -> Result<Resolution, ConflictError>,
{
    fn resolve(&self, candidates: &[PathBuf]) -> Result<Resolution, ConflictError> {
        self(candidates)
    }
}

/// Always refuses. The default policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverResolve;

impl ConflictHandler for NeverResolve {
    fn resolve(&self, _candidates: &[PathBuf]) -> Result<Resolution, ConflictError> {
        Err(ConflictError::Unresolvable)
    }
}

/// Drops every conflicting path from the farm.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipConflicts;

impl ConflictHandler for SkipConflicts {
    fn resolve(&self, _candidates: &[PathBuf]) -> Result<Resolution, ConflictError> {
        Ok(Resolution::Skip)
    }
}

/// The earliest supplied source tree wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreferFirst;

impl ConflictHandler for PreferFirst {
    fn resolve(&self, candidates: &[PathBuf]) -> Result<Resolution, ConflictError> {
        candidates
            .first()
            .cloned()
            .map(Resolution::Link)
            .ok_or(ConflictError::Unresolvable)
    }
}

/// The latest supplied source tree wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreferLast;

impl ConflictHandler for PreferLast {
    fn resolve(&self, candidates: &[PathBuf]) -> Result<Resolution, ConflictError> {
        candidates
            .last()
            .cloned()
            .map(Resolution::Link)
            .ok_or(ConflictError::Unresolvable)
    }
}

/// Serializable name for one of the built-in handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// [`NeverResolve`]
    #[default]
    Fail,
    /// [`SkipConflicts`]
    Skip,
    /// [`PreferFirst`]
    First,
    /// [`PreferLast`]
    Last,
}

impl ConflictPolicy {
    pub fn handler(self) -> Box<dyn ConflictHandler> {
        match self {
            ConflictPolicy::Fail => Box::new(NeverResolve),
            ConflictPolicy::Skip => Box::new(SkipConflicts),
            ConflictPolicy::First => Box::new(PreferFirst),
            ConflictPolicy::Last => Box::new(PreferLast),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConflictPolicy::Fail => "fail",
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::First => "first",
            ConflictPolicy::Last => "last",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(ConflictPolicy::Fail),
            "skip" => Ok(ConflictPolicy::Skip),
            "first" => Ok(ConflictPolicy::First),
            "last" => Ok(ConflictPolicy::Last),
            other => Err(format!(
                "unknown conflict policy {other:?} (expected fail, skip, first or last)"
            )),
        }
    }
}
