//! Related-element lookup for hover highlighting.
//!
//! A hovered element highlights its direct neighbors — elements joined
//! to it by an edge whose kind pair appears in the table below. One hop
//! only, no transitive closure. The table is symmetric: each pair is
//! stored once and checked in both directions, so hovering a function
//! lights up its interface exactly like hovering the interface lights up
//! the function.

use std::collections::HashSet;
use wv_core::model::DiagramModel;
use wv_core::wit::WitKind;
use wv_core::ElementId;
use wv_render::hit::effective_kind;

/// Kind pairs that highlight each other across an edge.
static RELATED_KINDS: &[(WitKind, WitKind)] = &[
    (WitKind::Package, WitKind::World),
    (WitKind::Package, WitKind::Interface),
    (WitKind::World, WitKind::Interface),
    (WitKind::World, WitKind::Import),
    (WitKind::World, WitKind::Export),
    (WitKind::Interface, WitKind::Function),
    (WitKind::Interface, WitKind::Resource),
    (WitKind::Interface, WitKind::Record),
    (WitKind::Interface, WitKind::Variant),
    (WitKind::Interface, WitKind::Enum),
    (WitKind::Interface, WitKind::Flags),
    (WitKind::Resource, WitKind::Function),
    (WitKind::Function, WitKind::Record),
    (WitKind::Function, WitKind::Variant),
    (WitKind::Function, WitKind::Enum),
    (WitKind::Function, WitKind::Flags),
    (WitKind::Function, WitKind::Primitive),
    (WitKind::Function, WitKind::List),
    (WitKind::Function, WitKind::Tuple),
    (WitKind::Function, WitKind::Option),
    (WitKind::Function, WitKind::Result),
];

/// Whether two kinds highlight each other, in either direction.
pub fn kinds_related(a: WitKind, b: WitKind) -> bool {
    RELATED_KINDS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Compute the related set for a hovered element: every node one edge
/// away whose kind pairs with the hovered node's kind.
pub fn related_elements(model: &DiagramModel, hovered: ElementId) -> HashSet<ElementId> {
    let mut related = HashSet::new();
    let Some(hovered_node) = model.get_node(hovered) else {
        return related;
    };
    let hovered_kind = effective_kind(hovered_node);

    for edge in model.edges() {
        let other = if edge.source == hovered {
            edge.target
        } else if edge.target == hovered {
            edge.source
        } else {
            continue;
        };
        let Some(other_node) = model.get_node(other) else {
            continue;
        };
        if kinds_related(hovered_kind, effective_kind(other_node)) {
            related.insert(other);
        }
    }

    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use wv_core::adapter::to_diagram;
    use wv_core::wit::{WitConnection, WitElement, WitGraph, WitRelation};

    fn graph() -> DiagramModel {
        let mut g = WitGraph::new(ElementId::intern("rel-g"), "g", "c");
        g.push_element(WitElement::new(ElementId::intern("rel-i"), WitKind::Interface, "logger"));
        g.push_element(WitElement::new(ElementId::intern("rel-f"), WitKind::Function, "log"));
        g.push_element(WitElement::new(ElementId::intern("rel-f2"), WitKind::Function, "flush"));
        g.push_element(WitElement::new(ElementId::intern("rel-p"), WitKind::Package, "pkg"));
        g.push_connection(WitConnection::new(
            ElementId::intern("rel-c1"),
            ElementId::intern("rel-i"),
            ElementId::intern("rel-f"),
            WitRelation::Contains,
        ));
        // No edge to rel-f2; kin alone is not enough.
        g.push_connection(WitConnection::new(
            ElementId::intern("rel-c2"),
            ElementId::intern("rel-p"),
            ElementId::intern("rel-f"),
            WitRelation::Dependency,
        ));
        to_diagram(&g)
    }

    #[test]
    fn table_is_symmetric() {
        for &(a, b) in RELATED_KINDS {
            assert!(kinds_related(a, b));
            assert!(kinds_related(b, a));
        }
        assert!(!kinds_related(WitKind::Package, WitKind::Function));
    }

    #[test]
    fn interface_highlights_contained_function() {
        let model = graph();
        let related = related_elements(&model, ElementId::intern("rel-i"));
        assert!(related.contains(&ElementId::intern("rel-f")));
        // Unconnected sibling function stays dark.
        assert!(!related.contains(&ElementId::intern("rel-f2")));
    }

    #[test]
    fn highlight_is_symmetric_across_the_edge() {
        let model = graph();
        let related = related_elements(&model, ElementId::intern("rel-f"));
        assert!(related.contains(&ElementId::intern("rel-i")));
        // package↔function is not in the table, even though an edge exists.
        assert!(!related.contains(&ElementId::intern("rel-p")));
    }

    #[test]
    fn single_hop_only() {
        let model = graph();
        // Hovering the package: the function is one hop but wrong kind
        // pair; the interface is two hops. Nothing lights up.
        let related = related_elements(&model, ElementId::intern("rel-p"));
        assert!(related.is_empty());
    }
}
