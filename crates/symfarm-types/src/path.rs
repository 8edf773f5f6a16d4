//! Farm-relative paths.
//!
//! A [`FarmPath`] names a location inside the farm and, equally, inside every
//! source tree. Segments are kept as host [`OsString`]s, so any name a source
//! tree can hold (including names that are not valid UTF-8) survives the trip
//! from scan to link. The rendered form always starts with [`SEPARATOR`] and
//! uses `/` between segments on every platform. The farm root itself is
//! implicit and can never be represented.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Segment separator used in the rendered form of a [`FarmPath`].
pub const SEPARATOR: char = '/';

/// A relative path inside the farm, e.g. `/dir/file`.
///
/// Ordering compares segment by segment (bytes within a segment), which is
/// the same as comparing rendered strings with the separator sorting before
/// every other character. A directory therefore always sorts before
/// everything beneath it, and the contents of a directory sort contiguously.
///
/// Serialization uses the rendered form, which replaces bytes that are not
/// valid UTF-8 with `U+FFFD`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FarmPath {
    // Never empty; every entry is a single normal component.
    segments: Vec<OsString>,
}

impl FarmPath {
    /// Parse a farm path from its rendered form.
    pub fn parse(s: &str) -> TypeResult<Self> {
        let rest = s
            .strip_prefix(SEPARATOR)
            .ok_or_else(|| TypeError::InvalidPath(format!("{s:?} does not start with '/'")))?;
        if rest.is_empty() {
            return Err(TypeError::InvalidPath("the farm root is implicit".to_string()));
        }
        let mut segments = Vec::new();
        for segment in rest.split(SEPARATOR) {
            match segment {
                "" => return Err(TypeError::InvalidPath(format!("{s:?} has an empty segment"))),
                "." | ".." => {
                    return Err(TypeError::InvalidPath(format!("{s:?} has a relative segment")))
                }
                _ => segments.push(OsString::from(segment)),
            }
        }
        Ok(Self { segments })
    }

    /// Build a farm path from a host path relative to a source tree root.
    ///
    /// `.` components are ignored. Absolute, prefixed, or `..` components are
    /// rejected, as is a path with no components at all (the tree root).
    pub fn from_relative(relative: &Path) -> TypeResult<Self> {
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_os_string()),
                Component::CurDir => {}
                _ => {
                    return Err(TypeError::InvalidPath(format!(
                        "{} is not relative to its root",
                        relative.display()
                    )))
                }
            }
        }
        if segments.is_empty() {
            return Err(TypeError::InvalidPath("the farm root is implicit".to_string()));
        }
        Ok(Self { segments })
    }

    /// Iterate the segments from the top of the farm downwards.
    pub fn segments(&self) -> impl Iterator<Item = &OsStr> + '_ {
        self.segments.iter().map(OsString::as_os_str)
    }

    /// Number of segments; top-level entries have depth 1.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The last segment.
    pub fn file_name(&self) -> &OsStr {
        self.segments.last().map_or(OsStr::new(""), OsString::as_os_str)
    }

    /// The enclosing directory, or `None` for top-level entries.
    pub fn parent(&self) -> Option<FarmPath> {
        match self.segments.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self {
                segments: rest.to_vec(),
            }),
            _ => None,
        }
    }

    /// Append a single segment.
    pub fn join(&self, name: impl AsRef<OsStr>) -> TypeResult<FarmPath> {
        let name = name.as_ref();
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(single)), None) if single == name => {
                let mut segments = self.segments.clone();
                segments.push(name.to_os_string());
                Ok(Self { segments })
            }
            _ => Err(TypeError::InvalidPath(format!(
                "{:?} is not a single segment",
                name.to_string_lossy()
            ))),
        }
    }

    /// Returns `true` if `self` is a strict ancestor directory of `other`.
    pub fn is_ancestor_of(&self, other: &FarmPath) -> bool {
        other.segments.len() > self.segments.len() && other.segments.starts_with(&self.segments)
    }

    /// Resolve this path beneath a host directory.
    pub fn to_path_under(&self, root: &Path) -> PathBuf {
        self.segments().fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

impl fmt::Debug for FarmPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FarmPath({:?})", self.to_string())
    }
}

impl fmt::Display for FarmPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{SEPARATOR}{}", segment.to_string_lossy())?;
        }
        Ok(())
    }
}

impl FromStr for FarmPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FarmPath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FarmPath> for String {
    fn from(path: FarmPath) -> Self {
        path.to_string()
    }
}
