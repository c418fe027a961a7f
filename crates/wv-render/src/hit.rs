//! Hit testing: world point → element lookup.
//!
//! Walks nodes in reverse draw order (last painted = topmost) and returns
//! the first whose bounds contain the point. Edges are not pickable —
//! only their endpoint nodes are. A narrower secondary region over the
//! expand/collapse indicator separates "toggle" clicks from "select"
//! clicks.

use wv_core::model::{DiagramModel, Node};
use wv_core::wit::WitKind;
use wv_core::{ElementId, ViewConfig};

/// Radius of the circular expander hit region at a container node's
/// bottom-right corner.
pub const EXPANDER_RADIUS: f32 = 8.0;

/// What a pointer position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// The node body — select / hover.
    Node(ElementId),
    /// The expand/collapse indicator of a container node.
    Expander(ElementId),
}

impl PickTarget {
    pub fn id(&self) -> ElementId {
        match self {
            PickTarget::Node(id) | PickTarget::Expander(id) => *id,
        }
    }
}

/// Effective kind of a node for visibility checks; unknown tags follow
/// the interface flag (the adapter's fallback kind).
pub fn effective_kind(node: &Node) -> WitKind {
    WitKind::from_tag(&node.element_type).unwrap_or(WitKind::Interface)
}

/// Whether a node is shown (and therefore pickable) under the view
/// configuration. Shared with the paint pass so the two never disagree.
pub fn node_visible(node: &Node, view: &ViewConfig) -> bool {
    view.is_visible(effective_kind(node))
}

/// Center of the expander indicator in world coordinates.
pub fn expander_center(node: &Node) -> (f32, f32) {
    let b = &node.bounds;
    (b.x + b.width - EXPANDER_RADIUS - 4.0, b.y + b.height - EXPANDER_RADIUS - 4.0)
}

/// Whether the point falls on the node's expander indicator.
/// Always false for non-container kinds.
pub fn hit_expander(node: &Node, px: f32, py: f32) -> bool {
    if !effective_kind(node).is_container() {
        return false;
    }
    let (cx, cy) = expander_center(node);
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= EXPANDER_RADIUS * EXPANDER_RADIUS
}

/// Find the topmost visible node at `(px, py)`, distinguishing body from
/// expander hits. Returns `None` over empty canvas.
pub fn pick(model: &DiagramModel, view: &ViewConfig, px: f32, py: f32) -> Option<PickTarget> {
    for id in model.draw_order.iter().rev() {
        let Some(node) = model.get_node(*id) else {
            continue;
        };
        if !node_visible(node, view) {
            continue;
        }
        if hit_expander(node, px, py) {
            return Some(PickTarget::Expander(node.id));
        }
        if node.bounds.contains(px, py) {
            return Some(PickTarget::Node(node.id));
        }
    }
    None
}

/// Plain topmost-node lookup, ignoring the expander sub-region.
pub fn hit_test(model: &DiagramModel, view: &ViewConfig, px: f32, py: f32) -> Option<ElementId> {
    for id in model.draw_order.iter().rev() {
        let Some(node) = model.get_node(*id) else {
            continue;
        };
        if node_visible(node, view) && node.bounds.contains(px, py) {
            return Some(node.id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wv_core::model::{Element, Point, Size};

    fn place(model: &mut DiagramModel, id: &str, tag: &str, x: f32, y: f32, w: f32, h: f32) {
        model.insert(Element::Node(Node::new(
            ElementId::intern(id),
            tag,
            Point::new(x, y),
            Size::new(w, h),
        )));
    }

    fn model() -> DiagramModel {
        DiagramModel::new(ElementId::intern("hit-d"), "wit-component")
    }

    #[test]
    fn hit_just_inside_the_corner() {
        let mut m = model();
        place(&mut m, "ht-a", "interface", 10.0, 10.0, 100.0, 60.0);
        let view = ViewConfig::default();

        assert_eq!(
            hit_test(&m, &view, 11.0, 11.0),
            Some(ElementId::intern("ht-a"))
        );
        assert_eq!(hit_test(&m, &view, 200.0, 200.0), None);
    }

    #[test]
    fn overlap_resolves_to_the_topmost() {
        let mut m = model();
        place(&mut m, "ht-under", "interface", 0.0, 0.0, 100.0, 100.0);
        place(&mut m, "ht-over", "function", 50.0, 50.0, 100.0, 100.0);
        let view = ViewConfig::default();

        // Overlap region belongs to the node drawn last.
        assert_eq!(
            hit_test(&m, &view, 75.0, 75.0),
            Some(ElementId::intern("ht-over"))
        );
        // Outside the overlap the lower node still wins.
        assert_eq!(
            hit_test(&m, &view, 10.0, 10.0),
            Some(ElementId::intern("ht-under"))
        );
    }

    #[test]
    fn hidden_kinds_are_not_pickable() {
        let mut m = model();
        place(&mut m, "ht-f", "function", 0.0, 0.0, 100.0, 60.0);
        let mut view = ViewConfig::default();
        assert!(hit_test(&m, &view, 10.0, 10.0).is_some());

        view.show_functions = false;
        assert_eq!(hit_test(&m, &view, 10.0, 10.0), None);
    }

    #[test]
    fn unknown_tags_follow_the_interface_flag() {
        let mut m = model();
        place(&mut m, "ht-u", "hologram", 0.0, 0.0, 80.0, 40.0);
        let mut view = ViewConfig::default();
        assert!(hit_test(&m, &view, 5.0, 5.0).is_some());
        view.show_interfaces = false;
        assert_eq!(hit_test(&m, &view, 5.0, 5.0), None);
    }

    #[test]
    fn expander_pick_on_container_corner() {
        let mut m = model();
        place(&mut m, "ht-pkg", "package", 0.0, 0.0, 200.0, 100.0);
        let view = ViewConfig::default();

        let node = m.get_node(ElementId::intern("ht-pkg")).unwrap();
        let (cx, cy) = expander_center(node);

        assert_eq!(
            pick(&m, &view, cx, cy),
            Some(PickTarget::Expander(ElementId::intern("ht-pkg")))
        );
        assert_eq!(
            pick(&m, &view, 10.0, 10.0),
            Some(PickTarget::Node(ElementId::intern("ht-pkg")))
        );
    }

    #[test]
    fn leaf_nodes_have_no_expander_region() {
        let mut m = model();
        place(&mut m, "ht-fn2", "function", 0.0, 0.0, 160.0, 70.0);
        let view = ViewConfig::default();

        let node = m.get_node(ElementId::intern("ht-fn2")).unwrap();
        let (cx, cy) = expander_center(node);
        assert_eq!(
            pick(&m, &view, cx, cy),
            Some(PickTarget::Node(ElementId::intern("ht-fn2")))
        );
    }
}
