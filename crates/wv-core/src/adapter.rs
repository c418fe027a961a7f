//! Bidirectional adapter between the semantic WIT graph and the generic
//! diagram model.
//!
//! Forward (`to_diagram`) projects each semantic element into a node whose
//! property bag carries everything the renderer and the reverse path need.
//! Reverse (`to_semantic`) reads the bags back out. Per-kind projection is
//! table-driven: adding a semantic kind means adding one `Projection` entry,
//! not growing a conditional chain.
//!
//! Fallback policy: an unknown element tag converts as `interface`, an
//! unknown relation tag as `dependency`. Partial data from evolving external
//! schemas is expected, so the reverse path warns and continues instead of
//! failing.

use crate::id::ElementId;
use crate::model::{DiagramModel, Edge, Element, Node, Point, Properties, Size};
use crate::wit::{NamedType, WitConnection, WitDetails, WitElement, WitGraph, WitKind, WitRelation};
use serde_json::{Value, json};

/// Diagram-type descriptor written into every converted model.
pub const DIAGRAM_TYPE: &str = "wit-component";

/// Property keys owned by the adapter.
mod keys {
    pub const KIND: &str = "kind";
    pub const NAME: &str = "name";
    pub const DOCS: &str = "docs";
    pub const WORLDS: &str = "worlds";
    pub const INTERFACES: &str = "interfaces";
    pub const IMPORTS: &str = "imports";
    pub const EXPORTS: &str = "exports";
    pub const FUNCTIONS: &str = "functions";
    pub const TYPES: &str = "types";
    pub const RESOURCES: &str = "resources";
    pub const PARAMS: &str = "params";
    pub const RESULTS: &str = "results";
    pub const METHODS: &str = "methods";
    pub const FIELDS: &str = "fields";
    pub const CASES: &str = "cases";
}

// ─── Default geometry ────────────────────────────────────────────────────

/// Default node size for a semantic kind, used when the element carries
/// no explicit size. Containers are larger than leaves so expansion
/// indicators and detail lines have room.
pub fn default_size(kind: WitKind) -> Size {
    match kind {
        WitKind::Package => Size::new(220.0, 140.0),
        WitKind::World => Size::new(200.0, 120.0),
        WitKind::Interface => Size::new(180.0, 100.0),
        WitKind::Resource => Size::new(170.0, 90.0),
        WitKind::Function => Size::new(160.0, 70.0),
        WitKind::Record | WitKind::Variant | WitKind::Enum | WitKind::Flags => {
            Size::new(150.0, 80.0)
        }
        WitKind::Import | WitKind::Export => Size::new(140.0, 60.0),
        WitKind::Primitive | WitKind::List | WitKind::Tuple | WitKind::Option | WitKind::Result => {
            Size::new(120.0, 50.0)
        }
    }
}

/// Deterministic grid slot for elements that arrive without a position.
/// Real layout is the embedding's job; this only keeps unplaced nodes
/// from stacking at the origin.
fn default_position(index: usize) -> Point {
    const COLS: usize = 4;
    const CELL_W: f32 = 260.0;
    const CELL_H: f32 = 180.0;
    const MARGIN: f32 = 60.0;
    Point::new(
        MARGIN + (index % COLS) as f32 * CELL_W,
        MARGIN + (index / COLS) as f32 * CELL_H,
    )
}

// ─── Projection table ────────────────────────────────────────────────────

/// One per-kind pair of pure projection functions.
struct Projection {
    kind: WitKind,
    /// Write the kind's detail payload into a node property bag.
    project_in: fn(&WitDetails, &mut Properties),
    /// Read the payload back out of a property bag.
    project_out: fn(&Properties) -> WitDetails,
}

static PROJECTIONS: &[Projection] = &[
    Projection {
        kind: WitKind::Package,
        project_in: package_in,
        project_out: package_out,
    },
    Projection {
        kind: WitKind::World,
        project_in: world_in,
        project_out: world_out,
    },
    Projection {
        kind: WitKind::Interface,
        project_in: interface_in,
        project_out: interface_out,
    },
    Projection {
        kind: WitKind::Function,
        project_in: function_in,
        project_out: function_out,
    },
    Projection {
        kind: WitKind::Resource,
        project_in: resource_in,
        project_out: resource_out,
    },
    Projection {
        kind: WitKind::Record,
        project_in: record_in,
        project_out: record_out,
    },
    Projection {
        kind: WitKind::Variant,
        project_in: cases_in,
        project_out: cases_out,
    },
    Projection {
        kind: WitKind::Enum,
        project_in: cases_in,
        project_out: cases_out,
    },
    Projection {
        kind: WitKind::Flags,
        project_in: cases_in,
        project_out: cases_out,
    },
];

fn projection_for(kind: WitKind) -> Option<&'static Projection> {
    PROJECTIONS.iter().find(|p| p.kind == kind)
}

// Per-kind projectors. Each pair must round-trip: `out(in(d)) == d`.

fn package_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::Package { worlds, interfaces } = details {
        props.insert(keys::WORLDS.into(), string_list(worlds));
        props.insert(keys::INTERFACES.into(), string_list(interfaces));
    }
}

fn package_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::WORLDS, keys::INTERFACES]) {
        return WitDetails::None;
    }
    WitDetails::Package {
        worlds: read_strings(props, keys::WORLDS),
        interfaces: read_strings(props, keys::INTERFACES),
    }
}

fn world_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::World { imports, exports } = details {
        props.insert(keys::IMPORTS.into(), string_list(imports));
        props.insert(keys::EXPORTS.into(), string_list(exports));
    }
}

fn world_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::IMPORTS, keys::EXPORTS]) {
        return WitDetails::None;
    }
    WitDetails::World {
        imports: read_strings(props, keys::IMPORTS),
        exports: read_strings(props, keys::EXPORTS),
    }
}

fn interface_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::Interface {
        functions,
        types,
        resources,
    } = details
    {
        props.insert(keys::FUNCTIONS.into(), string_list(functions));
        props.insert(keys::TYPES.into(), string_list(types));
        props.insert(keys::RESOURCES.into(), string_list(resources));
    }
}

fn interface_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::FUNCTIONS, keys::TYPES, keys::RESOURCES]) {
        return WitDetails::None;
    }
    WitDetails::Interface {
        functions: read_strings(props, keys::FUNCTIONS),
        types: read_strings(props, keys::TYPES),
        resources: read_strings(props, keys::RESOURCES),
    }
}

fn function_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::Function { params, results } = details {
        props.insert(keys::PARAMS.into(), named_list(params));
        props.insert(keys::RESULTS.into(), string_list(results));
    }
}

fn function_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::PARAMS, keys::RESULTS]) {
        return WitDetails::None;
    }
    WitDetails::Function {
        params: read_named(props, keys::PARAMS),
        results: read_strings(props, keys::RESULTS),
    }
}

fn resource_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::Resource { methods } = details {
        props.insert(keys::METHODS.into(), string_list(methods));
    }
}

fn resource_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::METHODS]) {
        return WitDetails::None;
    }
    WitDetails::Resource {
        methods: read_strings(props, keys::METHODS),
    }
}

fn record_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::Record { fields } = details {
        props.insert(keys::FIELDS.into(), named_list(fields));
    }
}

fn record_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::FIELDS]) {
        return WitDetails::None;
    }
    WitDetails::Record {
        fields: read_named(props, keys::FIELDS),
    }
}

fn cases_in(details: &WitDetails, props: &mut Properties) {
    if let WitDetails::Cases { cases } = details {
        props.insert(keys::CASES.into(), string_list(cases));
    }
}

fn cases_out(props: &Properties) -> WitDetails {
    if !has_any(props, &[keys::CASES]) {
        return WitDetails::None;
    }
    WitDetails::Cases {
        cases: read_strings(props, keys::CASES),
    }
}

// ─── Bag helpers ─────────────────────────────────────────────────────────

/// An element whose bag carries none of a projection's keys converts
/// back to `WitDetails::None` — the forward path never wrote details.
fn has_any(props: &Properties, keys: &[&str]) -> bool {
    keys.iter().any(|k| props.contains_key(*k))
}

fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
}

fn named_list(items: &[NamedType]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|nt| json!({ "name": nt.name, "ty": nt.ty }))
            .collect(),
    )
}

fn read_strings(props: &Properties, key: &str) -> Vec<String> {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn read_named(props: &Properties, key: &str) -> Vec<NamedType> {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| {
                    let name = v.get("name")?.as_str()?;
                    let ty = v.get("ty")?.as_str()?;
                    Some(NamedType::new(name, ty))
                })
                .collect()
        })
        .unwrap_or_default()
}

// ─── Forward conversion ──────────────────────────────────────────────────

/// Project one semantic element into a diagram node.
///
/// `slot` picks the default grid position for elements that arrive
/// without one; pass the element's index in its graph (or the current
/// node count when creating elements one at a time).
pub fn element_to_node(element: &WitElement, slot: usize) -> Node {
    let position = element.position.unwrap_or_else(|| default_position(slot));
    let size = element.size.unwrap_or_else(|| default_size(element.kind));

    let mut node = Node::new(element.id, element.kind.as_str(), position, size);
    node.properties
        .insert(keys::KIND.into(), Value::String(element.kind.as_str().into()));
    node.properties
        .insert(keys::NAME.into(), Value::String(element.name.clone()));
    if let Some(docs) = &element.docs {
        node.properties
            .insert(keys::DOCS.into(), Value::String(docs.clone()));
    }
    if let Some(p) = projection_for(element.kind) {
        (p.project_in)(&element.details, &mut node.properties);
    }
    node
}

/// Project one semantic connection into a diagram edge.
pub fn connection_to_edge(connection: &WitConnection) -> Edge {
    let mut edge = Edge::new(
        connection.id,
        connection.relation.as_str(),
        connection.source,
        connection.target,
    );
    edge.label = connection.label.clone();
    edge
}

/// Convert a semantic graph into a renderable diagram model.
///
/// Id uniqueness is enforced here: a second element or connection with an
/// already-used id is dropped with a warning rather than silently
/// replacing the first.
pub fn to_diagram(graph: &WitGraph) -> DiagramModel {
    let mut model = DiagramModel::new(
        ElementId::intern(&format!("{}.diagram", graph.id)),
        DIAGRAM_TYPE,
    );
    model.metadata.name = graph.name.clone();
    model.metadata.semantic_graph = Some(graph.id);
    model.metadata.component_name = Some(graph.component_name.clone());
    if let Some(cfg) = &graph.view_config {
        model.metadata.view_config = cfg.clone();
    }

    for (index, element) in graph.elements.iter().enumerate() {
        let node = element_to_node(element, index);
        if !model.insert(Element::Node(node)) {
            log::warn!("duplicate element id `{}` dropped during conversion", element.id);
        }
    }

    for connection in &graph.connections {
        let edge = connection_to_edge(connection);
        if !model.insert(Element::Edge(edge)) {
            log::warn!(
                "duplicate connection id `{}` dropped during conversion",
                connection.id
            );
        }
    }

    model
}

// ─── Reverse conversion ──────────────────────────────────────────────────

/// Read a semantic graph back out of a diagram model.
///
/// Elements come back in draw order, which is adapter insertion order for
/// an unedited model — so `to_semantic(to_diagram(g))` preserves element
/// and connection ordering as well as ids, kinds, and names.
pub fn to_semantic(model: &DiagramModel) -> WitGraph {
    let mut graph = WitGraph::new(
        model.metadata.semantic_graph.unwrap_or(model.id),
        model.metadata.name.clone(),
        model.metadata.component_name.clone().unwrap_or_default(),
    );
    graph.view_config = Some(model.metadata.view_config.clone());

    for element in model.draw_order.iter().filter_map(|id| model.get(*id)) {
        match element {
            Element::Node(node) => graph.push_element(node_to_element(node)),
            Element::Edge(edge) => graph.push_connection(edge_to_connection(edge)),
        }
    }

    graph
}

fn node_to_element(node: &Node) -> WitElement {
    let tag = node.prop_str(keys::KIND).unwrap_or(&node.element_type);
    let kind = WitKind::from_tag(tag).unwrap_or_else(|| {
        log::warn!("unknown element tag `{tag}` on `{}`, treating as interface", node.id);
        WitKind::Interface
    });

    let name = node
        .prop_str(keys::NAME)
        .map(str::to_owned)
        .unwrap_or_else(|| node.id.as_str().to_owned());

    let mut element = WitElement::new(node.id, kind, name);
    element.position = Some(node.position);
    element.size = Some(node.size);
    element.docs = node.prop_str(keys::DOCS).map(str::to_owned);
    if let Some(p) = projection_for(kind) {
        element.details = (p.project_out)(&node.properties);
    }
    element
}

fn edge_to_connection(edge: &Edge) -> WitConnection {
    let relation = WitRelation::from_tag(&edge.element_type).unwrap_or_else(|| {
        log::warn!(
            "unknown relation tag `{}` on `{}`, treating as dependency",
            edge.element_type,
            edge.id
        );
        WitRelation::Dependency
    });

    let mut connection = WitConnection::new(edge.id, edge.source, edge.target, relation);
    connection.label = edge.label.clone();
    connection
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_interface() -> WitElement {
        WitElement::new(
            ElementId::intern("wasi:logging/logger"),
            WitKind::Interface,
            "logger",
        )
        .with_details(WitDetails::Interface {
            functions: vec!["log".into(), "flush".into()],
            types: vec!["level".into()],
            resources: vec![],
        })
    }

    #[test]
    fn forward_projects_interface_details() {
        let mut graph = WitGraph::new(ElementId::intern("g1"), "logging", "wasi:logging");
        graph.push_element(sample_interface());

        let model = to_diagram(&graph);
        let node = model.get_node(ElementId::intern("wasi:logging/logger")).unwrap();

        assert_eq!(node.element_type, "interface");
        assert_eq!(node.prop_str("name"), Some("logger"));
        assert_eq!(
            node.properties["functions"],
            serde_json::json!(["log", "flush"])
        );
        assert_eq!(node.properties["types"], serde_json::json!(["level"]));
    }

    #[test]
    fn forward_assigns_default_geometry() {
        let mut graph = WitGraph::new(ElementId::intern("g2"), "g", "c");
        graph.push_element(WitElement::new(
            ElementId::intern("pkg"),
            WitKind::Package,
            "pkg",
        ));
        graph.push_element(WitElement::new(
            ElementId::intern("fun"),
            WitKind::Function,
            "fun",
        ));

        let model = to_diagram(&graph);
        let pkg = model.get_node(ElementId::intern("pkg")).unwrap();
        let fun = model.get_node(ElementId::intern("fun")).unwrap();

        assert_eq!(pkg.size, default_size(WitKind::Package));
        assert_eq!(fun.size, default_size(WitKind::Function));
        // Grid slots differ, so unplaced nodes never stack.
        assert_ne!(pkg.position, fun.position);
    }

    #[test]
    fn explicit_geometry_wins_over_defaults() {
        let mut graph = WitGraph::new(ElementId::intern("g3"), "g", "c");
        let mut e = WitElement::new(ElementId::intern("w"), WitKind::World, "w").at(400.0, 300.0);
        e.size = Some(Size::new(42.0, 24.0));
        graph.push_element(e);

        let model = to_diagram(&graph);
        let node = model.get_node(ElementId::intern("w")).unwrap();
        assert_eq!(node.position, Point::new(400.0, 300.0));
        assert_eq!(node.size, Size::new(42.0, 24.0));
    }

    #[test]
    fn reverse_falls_back_to_interface_and_dependency() {
        let mut model = DiagramModel::new(ElementId::intern("d"), DIAGRAM_TYPE);
        model.insert(Element::Node(Node::new(
            ElementId::intern("mystery"),
            "hologram",
            Point::new(0.0, 0.0),
            Size::new(10.0, 10.0),
        )));
        model.insert(Element::Node(Node::new(
            ElementId::intern("other"),
            "interface",
            Point::new(50.0, 0.0),
            Size::new(10.0, 10.0),
        )));
        model.insert(Element::Edge(Edge::new(
            ElementId::intern("e"),
            "teleports-to",
            ElementId::intern("mystery"),
            ElementId::intern("other"),
        )));

        let graph = to_semantic(&model);
        assert_eq!(graph.elements[0].kind, WitKind::Interface);
        assert_eq!(graph.connections[0].relation, WitRelation::Dependency);
    }

    #[test]
    fn reverse_reads_name_from_bag_or_id() {
        let mut model = DiagramModel::new(ElementId::intern("d"), DIAGRAM_TYPE);
        model.insert(Element::Node(Node::new(
            ElementId::intern("anon-node"),
            "function",
            Point::new(0.0, 0.0),
            Size::new(10.0, 10.0),
        )));
        let graph = to_semantic(&model);
        assert_eq!(graph.elements[0].name, "anon-node");
    }

    #[test]
    fn duplicate_ids_are_dropped_not_replaced() {
        let mut graph = WitGraph::new(ElementId::intern("g4"), "g", "c");
        graph.push_element(sample_interface());
        let mut dup = sample_interface();
        dup.name = "impostor".into();
        graph.push_element(dup);

        let model = to_diagram(&graph);
        assert_eq!(model.node_count(), 1);
        let node = model.get_node(ElementId::intern("wasi:logging/logger")).unwrap();
        assert_eq!(node.prop_str("name"), Some("logger"));
    }

    #[test]
    fn detail_less_elements_roundtrip_to_none() {
        let mut graph = WitGraph::new(ElementId::intern("g5"), "g", "c");
        graph.push_element(WitElement::new(
            ElementId::intern("bare-iface"),
            WitKind::Interface,
            "bare",
        ));

        let back = to_semantic(&to_diagram(&graph));
        assert_eq!(back.elements[0].details, WitDetails::None);
    }

    #[test]
    fn every_projected_kind_roundtrips_details() {
        let details = [
            (
                WitKind::Package,
                WitDetails::Package {
                    worlds: vec!["host".into()],
                    interfaces: vec!["logger".into()],
                },
            ),
            (
                WitKind::Function,
                WitDetails::Function {
                    params: vec![NamedType::new("level", "level"), NamedType::new("msg", "string")],
                    results: vec!["result<_, error>".into()],
                },
            ),
            (
                WitKind::Record,
                WitDetails::Record {
                    fields: vec![NamedType::new("code", "u32")],
                },
            ),
            (
                WitKind::Enum,
                WitDetails::Cases {
                    cases: vec!["debug".into(), "info".into(), "error".into()],
                },
            ),
        ];

        for (kind, detail) in details {
            let p = projection_for(kind).unwrap();
            let mut props = Properties::new();
            (p.project_in)(&detail, &mut props);
            assert_eq!((p.project_out)(&props), detail, "{kind} details");
        }
    }
}
