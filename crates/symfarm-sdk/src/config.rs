use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symfarm_merge::{ConflictHandler, ConflictPolicy, NeverResolve};

use crate::error::{FarmError, FarmResult};
use crate::link::{LinkHandler, LinkMode, Symlinker};

/// The capabilities a farm is created with.
pub struct FarmConfig {
    conflict_handler: Box<dyn ConflictHandler>,
    linker: Box<dyn LinkHandler>,
}

impl FarmConfig {
    pub fn new(
        conflict_handler: impl ConflictHandler + 'static,
        linker: impl LinkHandler + 'static,
    ) -> Self {
        Self {
            conflict_handler: Box::new(conflict_handler),
            linker: Box::new(linker),
        }
    }

    pub fn with_conflict_handler(mut self, handler: impl ConflictHandler + 'static) -> Self {
        self.conflict_handler = Box::new(handler);
        self
    }

    pub fn with_linker(mut self, linker: impl LinkHandler + 'static) -> Self {
        self.linker = Box::new(linker);
        self
    }

    pub fn conflict_handler(&self) -> &dyn ConflictHandler {
        self.conflict_handler.as_ref()
    }

    pub fn linker(&self) -> &dyn LinkHandler {
        self.linker.as_ref()
    }
}

/// Refuses file conflicts and creates symbolic links.
impl Default for FarmConfig {
    fn default() -> Self {
        Self::new(NeverResolve, Symlinker)
    }
}

impl fmt::Debug for FarmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FarmConfig").finish_non_exhaustive()
    }
}

/// File-backed settings selecting the built-in handlers.
///
/// ```toml
/// on_conflict = "skip"
/// link = "symlink"
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmSettings {
    pub on_conflict: ConflictPolicy,
    pub link: LinkMode,
}

impl FarmSettings {
    pub fn from_toml_str(s: &str) -> FarmResult<Self> {
        toml::from_str(s).map_err(|e| FarmError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> FarmResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| FarmError::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    pub fn into_config(self) -> FarmConfig {
        FarmConfig {
            conflict_handler: self.on_conflict.handler(),
            linker: self.link.handler(),
        }
    }
}
