//! Diagram model → Vello drawing commands.
//!
//! Emits one frame into a caller-provided `vello::Scene`: edges first
//! (behind), then nodes bottom-to-top in draw order, then the additive
//! hover/related overlays. Glyph rasterization is delegated to the
//! embedding's font stack; this pass computes every truncated string and
//! layout box and records the runs at trace level, the same division of
//! labor the rest of the pipeline assumes.

use crate::edge::{arrowhead, build_edge_path};
use crate::hit::{EXPANDER_RADIUS, effective_kind, expander_center, node_visible};
use crate::style::{self, EdgeStyle, NodeStyle};
use crate::text;
use crate::viewport::Viewport;
use kurbo::{Affine, Circle, Line, Rect, RoundedRect, Stroke};
use peniko::Fill;
use std::collections::HashSet;
use vello::Scene;
use wv_core::model::{DiagramModel, Edge, Node};
use wv_core::wit::{WitKind, WitRelation};
use wv_core::{ElementId, ExpansionSet, ViewConfig};

const NODE_PADDING: f64 = 8.0;
const LINE_SPACING: f32 = 1.4;

/// Everything the paint pass reads besides the model itself.
/// Overlay state is additive — nothing here mutates element data.
pub struct RenderState<'a> {
    pub viewport: &'a Viewport,
    pub view: &'a ViewConfig,
    pub expansion: &'a ExpansionSet,
    pub hovered: Option<ElementId>,
    pub related: &'a HashSet<ElementId>,
}

/// Paint the whole diagram into a freshly-cleared scene.
/// The caller presents the scene via its own wgpu surface.
pub fn paint_scene(scene: &mut Scene, model: &DiagramModel, state: &RenderState) {
    let transform = Affine::translate(state.viewport.offset)
        * Affine::scale(state.viewport.scale());

    for edge in model.edges() {
        paint_edge(scene, model, edge, state, transform);
    }
    for node in model.nodes() {
        if node_visible(node, state.view) {
            paint_node(scene, node, state, transform);
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

fn paint_edge(
    scene: &mut Scene,
    model: &DiagramModel,
    edge: &Edge,
    state: &RenderState,
    transform: Affine,
) {
    // Dangling edges are a validation error; skip them rather than fail
    // the frame. Edges to hidden nodes are skipped with their endpoint.
    let (Some(source), Some(target)) = (model.get_node(edge.source), model.get_node(edge.target))
    else {
        return;
    };
    if !node_visible(source, state.view) || !node_visible(target, state.view) {
        return;
    }

    let mut es = style::edge_style(&edge.element_type);
    apply_highlight(&mut es, &edge.element_type, state.view);

    let ep = build_edge_path(&source.bounds, &target.bounds, &edge.routing_points);

    let mut stroke = Stroke::new(es.width);
    if !es.dash.is_empty() {
        stroke = stroke.with_dashes(0.0, es.dash.iter().copied());
    }
    scene.stroke(&stroke, transform, es.color, None, &ep.path);

    let head = arrowhead(ep.end, ep.end_direction, es.arrow_size);
    scene.fill(Fill::NonZero, transform, es.color, None, &head);

    if let Some(label) = &edge.label {
        paint_edge_label(scene, label, ep.midpoint, transform);
    }
}

/// The view config can emphasize import/export wiring without touching
/// the style table itself.
fn apply_highlight(es: &mut EdgeStyle, tag: &str, view: &ViewConfig) {
    let highlighted = match WitRelation::from_tag(tag) {
        Some(WitRelation::Import) => view.highlight_imports,
        Some(WitRelation::Export) => view.highlight_exports,
        _ => false,
    };
    if highlighted {
        es.width *= 2.0;
        es.arrow_size *= 1.3;
    }
}

fn paint_edge_label(scene: &mut Scene, label: &str, at: kurbo::Point, transform: Affine) {
    const LABEL_SIZE: f32 = 11.0;
    let shown = text::truncate(label, LABEL_SIZE, 120.0);
    let w = text::measure(&shown, LABEL_SIZE) as f64 + 8.0;
    let h = LABEL_SIZE as f64 + 6.0;

    let plate = RoundedRect::from_rect(
        Rect::new(at.x - w / 2.0, at.y - h / 2.0, at.x + w / 2.0, at.y + h / 2.0),
        3.0,
    );
    scene.fill(Fill::NonZero, transform, style::PLATE_BG, None, &plate);
    log::trace!("edge label {shown:?} at ({:.1}, {:.1})", at.x, at.y);
}

// ─── Nodes ───────────────────────────────────────────────────────────────

fn paint_node(scene: &mut Scene, node: &Node, state: &RenderState, transform: Affine) {
    let ns = style::node_style(&node.element_type);
    let b = &node.bounds;
    let rect = Rect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.width) as f64,
        (b.y + b.height) as f64,
    );
    let shape = RoundedRect::from_rect(rect, ns.corner_radius);

    scene.fill(Fill::NonZero, transform, ns.fill, None, &shape);
    scene.stroke(
        &Stroke::new(ns.border_width),
        transform,
        ns.border,
        None,
        &shape,
    );

    paint_icon(scene, node, &ns, transform);
    paint_label(node, &ns);
    paint_detail_lines(node, &ns, state.expansion.is_expanded(node.id));

    let kind = effective_kind(node);
    if kind.is_container() {
        paint_expander(scene, node, &ns, state.expansion, transform);
    }

    // Additive overlays; base style and element data stay untouched.
    if state.hovered == Some(node.id) {
        let glow = RoundedRect::from_rect(rect.inflate(3.0, 3.0), ns.corner_radius + 3.0);
        scene.stroke(
            &Stroke::new(4.0),
            transform,
            style::HOVER_GLOW,
            None,
            &glow,
        );
    } else if state.related.contains(&node.id) {
        let outline = RoundedRect::from_rect(rect.inflate(2.0, 2.0), ns.corner_radius + 2.0);
        let stroke = Stroke::new(1.5).with_dashes(0.0, [4.0, 3.0]);
        scene.stroke(&stroke, transform, style::RELATED_OUTLINE, None, &outline);
    }
}

fn paint_icon(scene: &mut Scene, node: &Node, ns: &NodeStyle, transform: Affine) {
    let b = &node.bounds;
    let r = ns.icon_size as f64 / 2.0;
    let center = kurbo::Point::new(
        b.x as f64 + NODE_PADDING + r,
        b.y as f64 + NODE_PADDING + r,
    );
    scene.fill(
        Fill::NonZero,
        transform,
        ns.border.with_alpha(0.25),
        None,
        &Circle::new(center, r + 2.0),
    );
    log::trace!(
        "icon {:?} for {} at ({:.1}, {:.1})",
        ns.icon,
        node.id,
        center.x,
        center.y
    );
}

fn paint_label(node: &Node, ns: &NodeStyle) {
    // Blank name is fine — degraded nodes still get a box and border.
    let Some(name) = node.prop_str("name") else {
        return;
    };
    let avail = node.bounds.width - (NODE_PADDING as f32 * 3.0) - ns.icon_size;
    let shown = text::truncate(name, ns.font_size, avail.max(0.0));
    log::trace!("label {shown:?} for {}", node.id);
}

fn paint_detail_lines(node: &Node, ns: &NodeStyle, expanded: bool) {
    let lines = detail_lines(node, expanded);
    if lines.is_empty() {
        return;
    }

    let line_h = ns.font_size * LINE_SPACING;
    let header = ns.icon_size + NODE_PADDING as f32 * 2.0;
    let avail_h = node.bounds.height - header - NODE_PADDING as f32;
    let max_lines = (avail_h / line_h).floor().max(0.0) as usize;
    let avail_w = node.bounds.width - NODE_PADDING as f32 * 2.0;

    for line in lines.iter().take(max_lines) {
        let shown = text::truncate(line, ns.font_size - 2.0, avail_w);
        log::trace!("detail {shown:?} for {}", node.id);
    }
}

/// Type-specific detail lines shown under the node label.
///
/// Collapsed containers summarize member counts; expanded ones list the
/// member names themselves. A node missing the expected properties gets
/// no lines — per-element degradation, never a frame failure.
pub fn detail_lines(node: &Node, expanded: bool) -> Vec<String> {
    fn names(node: &Node, key: &str) -> Vec<String> {
        node.properties
            .get(key)
            .and_then(|v| v.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
    fn count(node: &Node, key: &str) -> usize {
        node.properties
            .get(key)
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0)
    }
    fn plural(n: usize, word: &str) -> String {
        if n == 1 {
            format!("1 {word}")
        } else {
            format!("{n} {word}s")
        }
    }
    /// Expanded container body: one line per member, prefixed by a
    /// marker glyph.
    fn member_list(node: &Node, keys: &[(&str, char)]) -> Vec<String> {
        let mut lines = Vec::new();
        for (key, marker) in keys {
            for name in names(node, key) {
                lines.push(format!("{marker} {name}"));
            }
        }
        lines
    }

    match effective_kind(node) {
        WitKind::Package => {
            if expanded {
                return member_list(node, &[("worlds", '\u{25CB}'), ("interfaces", '\u{25C9}')]);
            }
            let w = count(node, "worlds");
            let i = count(node, "interfaces");
            if w + i == 0 {
                return Vec::new();
            }
            vec![format!("{} · {}", plural(w, "world"), plural(i, "interface"))]
        }
        WitKind::World => {
            if expanded {
                return member_list(node, &[("imports", '\u{2190}'), ("exports", '\u{2192}')]);
            }
            let im = count(node, "imports");
            let ex = count(node, "exports");
            if im + ex == 0 {
                return Vec::new();
            }
            vec![format!("{} · {}", plural(im, "import"), plural(ex, "export"))]
        }
        WitKind::Interface => {
            if expanded {
                return member_list(
                    node,
                    &[
                        ("functions", '\u{0192}'),
                        ("types", '\u{25A4}'),
                        ("resources", '\u{25A3}'),
                    ],
                );
            }
            let f = count(node, "functions");
            let t = count(node, "types");
            let r = count(node, "resources");
            if f + t + r == 0 {
                return Vec::new();
            }
            vec![format!(
                "{} · {} · {}",
                plural(f, "function"),
                plural(t, "type"),
                plural(r, "resource")
            )]
        }
        WitKind::Function => {
            if !node.properties.contains_key("params") && !node.properties.contains_key("results") {
                return Vec::new();
            }
            let params: Vec<&str> = node
                .properties
                .get("params")
                .and_then(|v| v.as_array())
                .map(|a| {
                    a.iter()
                        .filter_map(|p| p.get("name").and_then(|n| n.as_str()))
                        .collect()
                })
                .unwrap_or_default();
            let results = count(node, "results");

            let mut lines = vec![format!("({})", params.join(", "))];
            if results > 0 {
                lines.push(format!("-> {}", plural(results, "result")));
            }
            lines
        }
        WitKind::Resource => {
            let m = count(node, "methods");
            if m == 0 {
                return Vec::new();
            }
            vec![plural(m, "method")]
        }
        WitKind::Record => {
            let f = count(node, "fields");
            if f == 0 {
                return Vec::new();
            }
            vec![plural(f, "field")]
        }
        WitKind::Variant | WitKind::Enum | WitKind::Flags => {
            let c = count(node, "cases");
            if c == 0 {
                return Vec::new();
            }
            vec![plural(c, "case")]
        }
        _ => Vec::new(),
    }
}

fn paint_expander(
    scene: &mut Scene,
    node: &Node,
    ns: &NodeStyle,
    expansion: &ExpansionSet,
    transform: Affine,
) {
    let (cx, cy) = expander_center(node);
    let center = kurbo::Point::new(cx as f64, cy as f64);
    let r = EXPANDER_RADIUS as f64 - 1.0;

    let circle = Circle::new(center, r);
    scene.fill(Fill::NonZero, transform, style::PLATE_BG, None, &circle);
    scene.stroke(&Stroke::new(1.2), transform, ns.border, None, &circle);

    let arm = r * 0.55;
    let stroke = Stroke::new(1.6);
    // Horizontal bar: minus for expanded, plus gets the vertical bar too.
    let h_bar = Line::new((center.x - arm, center.y), (center.x + arm, center.y));
    scene.stroke(&stroke, transform, ns.border, None, &h_bar);
    if !expansion.is_expanded(node.id) {
        let v_bar = Line::new((center.x, center.y - arm), (center.x, center.y + arm));
        scene.stroke(&stroke, transform, ns.border, None, &v_bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wv_core::model::{Point, Size};

    fn node_with(tag: &str, props: &[(&str, serde_json::Value)]) -> Node {
        let mut n = Node::new(
            ElementId::intern("pt-n"),
            tag,
            Point::new(0.0, 0.0),
            Size::new(180.0, 100.0),
        );
        for (k, v) in props {
            n.properties.insert((*k).into(), v.clone());
        }
        n
    }

    #[test]
    fn collapsed_interface_counts_members() {
        let n = node_with(
            "interface",
            &[
                ("functions", json!(["log", "flush"])),
                ("types", json!(["level"])),
                ("resources", json!([])),
            ],
        );
        assert_eq!(
            detail_lines(&n, false),
            vec!["2 functions · 1 type · 0 resources".to_string()]
        );
    }

    #[test]
    fn expanded_interface_lists_member_names() {
        let n = node_with(
            "interface",
            &[
                ("functions", json!(["log", "flush"])),
                ("types", json!(["level"])),
                ("resources", json!([])),
            ],
        );
        let lines = detail_lines(&n, true);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("log"));
        assert!(lines[1].ends_with("flush"));
        assert!(lines[2].ends_with("level"));
    }

    #[test]
    fn function_details_show_signature() {
        let n = node_with(
            "function",
            &[
                (
                    "params",
                    json!([{ "name": "level", "ty": "level" }, { "name": "msg", "ty": "string" }]),
                ),
                ("results", json!(["string"])),
            ],
        );
        let lines = detail_lines(&n, false);
        assert_eq!(lines[0], "(level, msg)");
        assert_eq!(lines[1], "-> 1 result");
    }

    #[test]
    fn missing_properties_degrade_to_blank_lines() {
        let n = node_with("interface", &[]);
        assert!(detail_lines(&n, false).is_empty());
        assert!(detail_lines(&n, true).is_empty());
        let n = node_with("resource", &[]);
        assert!(detail_lines(&n, false).is_empty());
        let n = node_with("function", &[]);
        assert!(detail_lines(&n, false).is_empty());
    }

    #[test]
    fn unknown_kind_has_no_detail_lines() {
        let n = node_with("hologram", &[]);
        assert!(detail_lines(&n, false).is_empty());
    }

    #[test]
    fn scene_emission_smoke() {
        use wv_core::model::Element;

        let mut model = DiagramModel::new(ElementId::intern("pt-d"), "wit-component");
        model.insert(Element::Node(Node::new(
            ElementId::intern("pt-a"),
            "package",
            Point::new(0.0, 0.0),
            Size::new(220.0, 140.0),
        )));
        model.insert(Element::Node(Node::new(
            ElementId::intern("pt-b"),
            "interface",
            Point::new(400.0, 0.0),
            Size::new(180.0, 100.0),
        )));
        model.insert(Element::Edge(Edge::new(
            ElementId::intern("pt-e"),
            "contains",
            ElementId::intern("pt-a"),
            ElementId::intern("pt-b"),
        )));
        // Dangling edge must be skipped, not panic.
        model.insert(Element::Edge(Edge::new(
            ElementId::intern("pt-dangle"),
            "uses",
            ElementId::intern("pt-a"),
            ElementId::intern("pt-ghost"),
        )));

        let viewport = Viewport::new();
        let view = ViewConfig::default();
        let expansion = ExpansionSet::default();
        let related = HashSet::from([ElementId::intern("pt-b")]);
        let state = RenderState {
            viewport: &viewport,
            view: &view,
            expansion: &expansion,
            hovered: Some(ElementId::intern("pt-a")),
            related: &related,
        };

        let mut scene = Scene::new();
        paint_scene(&mut scene, &model, &state);
    }
}
