//! Foundation types for symfarm.
//!
//! A farm is a directory tree made of real directories plus links pointing
//! back at files in one or more source trees. The types in this crate carry
//! scan results into the merge resolver and resolved actions out of it.
//!
//! # Key Types
//!
//! - [`FarmPath`] -- A relative path inside the farm, always rooted at `/`
//! - [`PathRecord`] -- One entry seen in one source tree
//! - [`PathGroup`] -- All records sharing a farm path, in source order
//! - [`Inventory`] -- Farm path to [`PathGroup`] mapping built by the scanner
//! - [`PendingAction`] / [`ActionKind`] -- A directory or link to create

pub mod action;
pub mod error;
pub mod path;
pub mod record;

pub use action::{ActionKind, PendingAction};
pub use error::{TypeError, TypeResult};
pub use path::{FarmPath, SEPARATOR};
pub use record::{Inventory, PathGroup, PathRecord};
