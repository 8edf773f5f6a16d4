//! Action sequencing: ancestors before descendants.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use symfarm_types::{FarmPath, PendingAction};

/// Order resolved actions so every directory precedes everything inside it.
///
/// Stable sort by [`FarmPath`] ordering. A directory's path is a strict
/// segment prefix of its descendants' paths, and segment-wise comparison puts
/// a prefix first.
pub fn sequence(mut actions: Vec<PendingAction>) -> FarmPlan {
    actions.sort_by(|a, b| a.path.cmp(&b.path));
    FarmPlan { actions }
}

/// An ordered list of actions ready to execute against a farm root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmPlan {
    actions: Vec<PendingAction>,
}

impl FarmPlan {
    pub fn actions(&self) -> &[PendingAction] {
        &self.actions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PendingAction> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn directory_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_directory()).count()
    }

    pub fn link_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_link()).count()
    }

    /// Returns `true` if every action whose path is a strict ancestor of
    /// another action's path comes before it.
    pub fn is_well_ordered(&self) -> bool {
        let positions: HashMap<&FarmPath, usize> = self
            .actions
            .iter()
            .enumerate()
            .map(|(i, a)| (&a.path, i))
            .collect();

        self.actions.iter().enumerate().all(|(i, action)| {
            let mut ancestor = action.path.parent();
            while let Some(dir) = ancestor {
                if positions.get(&dir).is_some_and(|&pos| pos > i) {
                    return false;
                }
                ancestor = dir.parent();
            }
            true
        })
    }
}

impl<'a> IntoIterator for &'a FarmPlan {
    type Item = &'a PendingAction;
    type IntoIter = std::slice::Iter<'a, PendingAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
