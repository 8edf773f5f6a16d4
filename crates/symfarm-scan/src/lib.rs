//! Source tree scanner for symfarm.
//!
//! Walks every source tree in the order supplied and records, for each
//! relative path, which tree contributed it and whether it is a real
//! directory. Symbolic links are never followed and never count as
//! directories.

pub mod error;
pub mod scanner;

pub use error::{ScanError, ScanResult};
pub use scanner::{scan_sources, scan_tree};
