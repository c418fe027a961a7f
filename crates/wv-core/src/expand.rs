//! Expand/collapse state for container elements.
//!
//! Membership is derived from an expansion level, then adjusted by
//! explicit per-element toggles. Toggles survive until the next
//! `set_level` call, which recomputes the whole set from scratch.

use crate::id::ElementId;
use crate::model::DiagramModel;
use crate::wit::WitKind;
use std::collections::HashSet;

/// Reveal depth of a semantic kind: the smallest expansion level at which
/// elements of this kind are shown expanded.
pub fn reveal_depth(kind: WitKind) -> i32 {
    match kind {
        WitKind::Package => 1,
        WitKind::World => 2,
        WitKind::Interface => 3,
        _ => 4,
    }
}

/// The set of currently expanded container ids.
#[derive(Debug, Default)]
pub struct ExpansionSet {
    expanded: HashSet<ElementId>,
    level: i32,
}

impl ExpansionSet {
    /// Derive the set for an expansion level: a container is expanded iff
    /// `level >= reveal_depth(kind)`. Drops all prior toggles.
    pub fn set_level(&mut self, model: &DiagramModel, level: i32) {
        self.level = level;
        self.expanded.clear();
        for node in model.nodes() {
            let Some(kind) = WitKind::from_tag(&node.element_type) else {
                continue;
            };
            if kind.is_container() && level >= reveal_depth(kind) {
                self.expanded.insert(node.id);
            }
        }
    }

    /// Flip a single element independent of the current level.
    /// Returns the new membership.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: ElementId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Reset to empty (used on diagram reload).
    pub fn clear(&mut self) {
        self.expanded.clear();
        self.level = 0;
    }
}
