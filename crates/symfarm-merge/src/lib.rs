//! Merge engine for symfarm.
//!
//! Turns the scanner's [`Inventory`](symfarm_types::Inventory) into an ordered
//! [`FarmPlan`]: every farm path becomes a directory, a single link, or a
//! conflict. Directory vs file mismatches are always fatal; file vs file
//! conflicts are delegated to a pluggable [`ConflictHandler`].
//!
//! # Key Types
//!
//! - [`resolve`] -- Inventory to unordered pending actions
//! - [`sequence`] / [`FarmPlan`] -- Ancestor-first ordering of those actions
//! - [`ConflictHandler`] / [`Resolution`] -- File vs file conflict policy
//! - [`ConflictPolicy`] -- Serializable selector for the built-in policies

pub mod conflict;
pub mod error;
pub mod resolve;
pub mod sequence;

pub use conflict::{
    ConflictHandler, ConflictPolicy, NeverResolve, PreferFirst, PreferLast, Resolution,
    SkipConflicts,
};
pub use error::{ConflictError, MergeError, MergeResult};
pub use resolve::{resolve, resolve_group};
pub use sequence::{sequence, FarmPlan};
