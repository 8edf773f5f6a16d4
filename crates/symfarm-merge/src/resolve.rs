//! Merge resolution: decide the fate of every farm path.

use symfarm_types::{FarmPath, Inventory, PathGroup, PendingAction};
use tracing::debug;

use crate::conflict::ConflictHandler;
use crate::error::{MergeError, MergeResult};

/// Resolve every group in the inventory into at most one pending action.
///
/// Groups are visited in [`FarmPath`] order. The first conflict aborts the
/// whole resolution and no actions are returned. The result is unordered as
/// far as callers are concerned; pass it to [`sequence`](crate::sequence).
pub fn resolve(
    inventory: &Inventory,
    handler: &dyn ConflictHandler,
) -> MergeResult<Vec<PendingAction>> {
    let mut actions = Vec::with_capacity(inventory.len());
    for (path, group) in inventory {
        if let Some(action) = resolve_group(path, group, handler)? {
            actions.push(action);
        }
    }
    debug!(
        paths = inventory.len(),
        actions = actions.len(),
        "merge resolution complete"
    );
    Ok(actions)
}

/// Resolve a single group.
///
/// Returns `Ok(None)` when the path is deliberately left out of the farm.
pub fn resolve_group(
    path: &FarmPath,
    group: &PathGroup,
    handler: &dyn ConflictHandler,
) -> MergeResult<Option<PendingAction>> {
    if group.any_dir() {
        if group.all_dirs() {
            return Ok(Some(PendingAction::make_directory(path.clone())));
        }
        return Err(MergeError::FileDirectoryConflict {
            path: path.clone(),
            directories: group.directory_origins(),
            files: group.file_origins(),
        });
    }

    let origin = match group.records() {
        [] => return Ok(None),
        [only] => only.origin.clone(),
        _ => {
            let candidates = group.origins();
            let resolution = match handler.resolve(&candidates) {
                Ok(resolution) => resolution,
                Err(source) => {
                    return Err(MergeError::UnresolvableConflict {
                        path: path.clone(),
                        candidates,
                        source,
                    })
                }
            };
            match resolution.chosen() {
                Some(chosen) => chosen.to_path_buf(),
                None => {
                    debug!(%path, candidates = candidates.len(), "conflict resolved by skipping");
                    return Ok(None);
                }
            }
        }
    };

    if origin.as_os_str().is_empty() {
        return Ok(None);
    }
    Ok(Some(PendingAction::make_link(path.clone(), origin)))
}
