//! Integration tests: semantic graph → diagram → semantic graph round-trip.
//!
//! Verifies that no data is lost when converting WitGraph → DiagramModel →
//! WitGraph with no engine-side edits in between.

use wv_core::adapter::{to_diagram, to_semantic};
use wv_core::id::ElementId;
use wv_core::wit::*;

// ─── Fixtures ────────────────────────────────────────────────────────────

/// A logging component: package → world → interface → functions/types,
/// with the full spread of relation tags.
fn logging_graph() -> WitGraph {
    let mut g = WitGraph::new(
        ElementId::intern("rt:wasi-logging"),
        "wasi logging",
        "wasi:logging@0.2.0",
    );

    g.push_element(
        WitElement::new(ElementId::intern("rt:pkg"), WitKind::Package, "wasi:logging")
            .with_details(WitDetails::Package {
                worlds: vec!["imports".into()],
                interfaces: vec!["logging".into()],
            }),
    );
    g.push_element(
        WitElement::new(ElementId::intern("rt:world"), WitKind::World, "imports").with_details(
            WitDetails::World {
                imports: vec!["logging".into()],
                exports: vec![],
            },
        ),
    );
    g.push_element(
        WitElement::new(ElementId::intern("rt:iface"), WitKind::Interface, "logging")
            .with_details(WitDetails::Interface {
                functions: vec!["log".into()],
                types: vec!["level".into()],
                resources: vec![],
            })
            .at(120.0, 80.0),
    );
    g.push_element(
        WitElement::new(ElementId::intern("rt:log"), WitKind::Function, "log").with_details(
            WitDetails::Function {
                params: vec![
                    NamedType::new("level", "level"),
                    NamedType::new("context", "string"),
                    NamedType::new("message", "string"),
                ],
                results: vec![],
            },
        ),
    );
    g.push_element(
        WitElement::new(ElementId::intern("rt:level"), WitKind::Enum, "level").with_details(
            WitDetails::Cases {
                cases: vec![
                    "trace".into(),
                    "debug".into(),
                    "info".into(),
                    "warn".into(),
                    "error".into(),
                ],
            },
        ),
    );

    g.push_connection(WitConnection::new(
        ElementId::intern("rt:c1"),
        ElementId::intern("rt:pkg"),
        ElementId::intern("rt:world"),
        WitRelation::Contains,
    ));
    g.push_connection(WitConnection::new(
        ElementId::intern("rt:c2"),
        ElementId::intern("rt:world"),
        ElementId::intern("rt:iface"),
        WitRelation::Contains,
    ));
    g.push_connection(WitConnection::new(
        ElementId::intern("rt:c3"),
        ElementId::intern("rt:iface"),
        ElementId::intern("rt:log"),
        WitRelation::Contains,
    ));
    let mut uses = WitConnection::new(
        ElementId::intern("rt:c4"),
        ElementId::intern("rt:log"),
        ElementId::intern("rt:level"),
        WitRelation::TypeReference,
    );
    uses.label = Some("level".into());
    g.push_connection(uses);

    g
}

/// Round-trip and compare element ids, kinds, names, and the connection set.
fn assert_roundtrip_preserves(original: &WitGraph) {
    let model = to_diagram(original);
    let back = to_semantic(&model);

    assert_eq!(back.id, original.id, "graph id changed");
    assert_eq!(back.name, original.name, "graph name changed");
    assert_eq!(
        back.component_name, original.component_name,
        "component name changed"
    );

    assert_eq!(
        back.elements.len(),
        original.elements.len(),
        "element count mismatch after round-trip"
    );
    for e1 in &original.elements {
        let e2 = back
            .element(e1.id)
            .unwrap_or_else(|| panic!("element {:?} lost after round-trip", e1.id));
        assert_eq!(e2.kind, e1.kind, "kind changed for {:?}", e1.id);
        assert_eq!(e2.name, e1.name, "name changed for {:?}", e1.id);
        assert_eq!(e2.details, e1.details, "details changed for {:?}", e1.id);
    }

    assert_eq!(
        back.connections.len(),
        original.connections.len(),
        "connection count mismatch after round-trip"
    );
    for c1 in &original.connections {
        let c2 = back
            .connections
            .iter()
            .find(|c| c.id == c1.id)
            .unwrap_or_else(|| panic!("connection {:?} lost after round-trip", c1.id));
        assert_eq!(c2.source, c1.source);
        assert_eq!(c2.target, c1.target);
        assert_eq!(c2.relation, c1.relation);
        assert_eq!(c2.label, c1.label);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[test]
fn roundtrip_logging_component() {
    assert_roundtrip_preserves(&logging_graph());
}

#[test]
fn roundtrip_empty_graph() {
    let g = WitGraph::new(ElementId::intern("rt:empty"), "empty", "empty:component");
    assert_roundtrip_preserves(&g);
}

#[test]
fn roundtrip_preserves_explicit_geometry() {
    let g = logging_graph();
    let back = to_semantic(&to_diagram(&g));
    let iface = back.element(ElementId::intern("rt:iface")).unwrap();
    let pos = iface.position.expect("position lost");
    assert!((pos.x - 120.0).abs() < f32::EPSILON);
    assert!((pos.y - 80.0).abs() < f32::EPSILON);
}

#[test]
fn roundtrip_regenerates_default_geometry_consistently() {
    // Elements without positions get grid defaults on the way in; the way
    // back reads those concrete values, so a second round-trip is stable.
    let g = logging_graph();
    let once = to_semantic(&to_diagram(&g));
    let twice = to_semantic(&to_diagram(&once));

    for (e1, e2) in once.elements.iter().zip(twice.elements.iter()) {
        assert_eq!(e1.position, e2.position, "geometry drifted for {:?}", e1.id);
        assert_eq!(e1.size, e2.size);
    }
}

#[test]
fn roundtrip_preserves_view_config() {
    let mut g = logging_graph();
    let cfg = wv_core::ViewConfig {
        show_types: false,
        expand_level: 3,
        ..Default::default()
    };
    g.view_config = Some(cfg.clone());

    let back = to_semantic(&to_diagram(&g));
    assert_eq!(back.view_config, Some(cfg));
}

#[test]
fn roundtrip_preserves_element_order() {
    let g = logging_graph();
    let back = to_semantic(&to_diagram(&g));
    let ids1: Vec<_> = g.elements.iter().map(|e| e.id).collect();
    let ids2: Vec<_> = back.elements.iter().map(|e| e.id).collect();
    assert_eq!(ids1, ids2);
}
