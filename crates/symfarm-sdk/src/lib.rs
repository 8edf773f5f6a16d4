//! High-level API for symfarm.
//!
//! [`create`] is the main entry point: it checks the target, scans the
//! source trees, resolves conflicts, orders the resulting actions, and
//! executes them. [`plan`] stops short of touching the filesystem.
//!
//! ```no_run
//! use symfarm_sdk::{create, FarmConfig};
//!
//! # fn main() -> Result<(), symfarm_sdk::FarmError> {
//! let report = create(&FarmConfig::default(), "farm", ["tree-a", "tree-b"])?;
//! println!("{} directories, {} links", report.directories, report.links);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod farm;
pub mod link;

pub use config::{FarmConfig, FarmSettings};
pub use error::{FarmError, FarmResult};
pub use farm::{check_target, create, execute, plan, FarmReport, TargetState};
pub use link::{HardLinker, LinkHandler, LinkMode, Symlinker};

// Re-export key types
pub use symfarm_merge::{
    ConflictError, ConflictHandler, ConflictPolicy, FarmPlan, MergeError, NeverResolve,
    PreferFirst, PreferLast, Resolution, SkipConflicts,
};
pub use symfarm_scan::ScanError;
pub use symfarm_types::{ActionKind, FarmPath, PendingAction};
