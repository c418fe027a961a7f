//! Containment index over the semantic `contains` relations.
//!
//! The diagram arena is flat; nesting questions (who is inside whom,
//! which children does an expanded container reveal) are answered here.
//! Rebuilt from the model's edges on load and after create/delete —
//! cheap enough that incremental maintenance isn't worth the bookkeeping.

use crate::id::ElementId;
use crate::model::DiagramModel;
use crate::wit::WitRelation;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;

/// Parent→child containment as a directed graph.
#[derive(Debug, Default)]
pub struct Hierarchy {
    graph: StableDiGraph<ElementId, ()>,
    index: HashMap<ElementId, NodeIndex>,
}

impl Hierarchy {
    /// Build the index from every `contains` edge in the model.
    /// Edges with a missing endpoint are skipped; `validate` reports them.
    pub fn from_model(model: &DiagramModel) -> Self {
        let mut h = Self::default();

        for node in model.nodes() {
            h.add(node.id);
        }
        for edge in model.edges() {
            if edge.element_type != WitRelation::Contains.as_str() {
                continue;
            }
            let (Some(&parent), Some(&child)) =
                (h.index.get(&edge.source), h.index.get(&edge.target))
            else {
                continue;
            };
            h.graph.add_edge(parent, child, ());
        }

        h
    }

    fn add(&mut self, id: ElementId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.index.insert(id, idx);
        idx
    }

    /// Direct children in deterministic order.
    ///
    /// Sorts by `NodeIndex` so the result does not depend on how petgraph
    /// iterates its adjacency list on different targets.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        children.sort();
        children.into_iter().map(|i| self.graph[i]).collect()
    }

    /// The containing element, if any.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        let &idx = self.index.get(&id)?;
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .map(|i| self.graph[i])
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        if ancestor == descendant {
            return false;
        }
        let mut current = descendant;
        while let Some(parent) = self.parent(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }
}
