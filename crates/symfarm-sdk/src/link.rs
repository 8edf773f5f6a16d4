//! Link creation primitives.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Creates `link` as a link pointing at `origin`.
///
/// Any `Fn(&Path, &Path) -> io::Result<()>` closure is a link handler.
pub trait LinkHandler {
    fn link(&self, origin: &Path, link: &Path) -> io::Result<()>;
}

impl<F> LinkHandler for F
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    fn link(&self, origin: &Path, link: &Path) -> io::Result<()> {
        self(origin, link)
    }
}

/// Symbolic links. The default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Symlinker;

impl LinkHandler for Symlinker {
    #[cfg(unix)]
    fn link(&self, origin: &Path, link: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(origin, link)
    }

    #[cfg(windows)]
    fn link(&self, origin: &Path, link: &Path) -> io::Result<()> {
        if fs::metadata(origin).map(|m| m.is_dir()).unwrap_or(false) {
            std::os::windows::fs::symlink_dir(origin, link)
        } else {
            std::os::windows::fs::symlink_file(origin, link)
        }
    }
}

/// Hard links. Origins must live on the same filesystem as the farm.
#[derive(Clone, Copy, Debug, Default)]
pub struct HardLinker;

impl LinkHandler for HardLinker {
    fn link(&self, origin: &Path, link: &Path) -> io::Result<()> {
        fs::hard_link(origin, link)
    }
}

/// Serializable name for one of the built-in link handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    #[default]
    Symlink,
    Hard,
}

impl LinkMode {
    pub fn handler(self) -> Box<dyn LinkHandler> {
        match self {
            LinkMode::Symlink => Box::new(Symlinker),
            LinkMode::Hard => Box::new(HardLinker),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkMode::Symlink => "symlink",
            LinkMode::Hard => "hard",
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symlink" => Ok(LinkMode::Symlink),
            "hard" => Ok(LinkMode::Hard),
            other => Err(format!("unknown link mode {other:?} (expected symlink or hard)")),
        }
    }
}
