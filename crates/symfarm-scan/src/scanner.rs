//! Walks source trees into an [`Inventory`].

use std::path::Path;

use symfarm_types::{FarmPath, Inventory, PathRecord};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ScanError, ScanResult};

/// Scan every source tree, in the order given, into a fresh inventory.
///
/// The first failing tree aborts the scan and nothing is returned for the
/// trees already visited.
pub fn scan_sources<I, P>(roots: I) -> ScanResult<Inventory>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut inventory = Inventory::new();
    let mut trees = 0usize;
    for root in roots {
        scan_tree(root.as_ref(), &mut inventory)?;
        trees += 1;
    }
    debug!(
        trees,
        paths = inventory.len(),
        records = inventory.record_count(),
        "scan complete"
    );
    Ok(inventory)
}

/// Scan a single source tree and append its records to `inventory`.
///
/// Returns the number of records added. On error the inventory is left
/// untouched.
pub fn scan_tree(root: &Path, inventory: &mut Inventory) -> ScanResult<usize> {
    let mut records = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        // The tree root is implicit in the farm.
        if entry.depth() == 0 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| ScanError::OutsideRoot {
                root: root.to_path_buf(),
                path: entry.path().to_path_buf(),
            })?;
        let path = FarmPath::from_relative(relative).map_err(|source| ScanError::InvalidPath {
            root: root.to_path_buf(),
            source,
        })?;

        // Without link following, a symlink reports its own type, so a link
        // to a directory is recorded as a non-directory.
        let is_dir = entry.file_type().is_dir();
        records.push(PathRecord::new(path, entry.path(), is_dir));
    }

    let count = records.len();
    inventory.extend(records);
    debug!(root = %root.display(), entries = count, "scanned source tree");
    Ok(count)
}
