//! Drives the engine against a sample WIT component graph.
//!
//! Builds the wasi:logging shape (package → world → interface →
//! function/enum), loads it, simulates a hover session, and prints
//! validation results. Run with `RUST_LOG=debug` to watch the engine.

use kurbo::Size;
use std::time::{Duration, Instant};
use wv_core::id::ElementId;
use wv_core::wit::*;
use wv_interact::{DEBOUNCE_INTERVAL, DiagramEngine, InputEvent, TOOLTIP_DELAY};

fn sample_graph() -> WitGraph {
    let mut g = WitGraph::new(
        ElementId::intern("wasi:logging"),
        "wasi logging",
        "wasi:logging@0.2.0",
    );

    g.push_element(
        WitElement::new(ElementId::intern("pkg"), WitKind::Package, "wasi:logging").with_details(
            WitDetails::Package {
                worlds: vec!["imports".into()],
                interfaces: vec!["logging".into()],
            },
        ),
    );
    g.push_element(
        WitElement::new(ElementId::intern("world"), WitKind::World, "imports").with_details(
            WitDetails::World {
                imports: vec!["logging".into()],
                exports: vec![],
            },
        ),
    );
    g.push_element(
        WitElement::new(ElementId::intern("logging"), WitKind::Interface, "logging")
            .with_details(WitDetails::Interface {
                functions: vec!["log".into()],
                types: vec!["level".into()],
                resources: vec![],
            }),
    );
    g.push_element(
        WitElement::new(ElementId::intern("log"), WitKind::Function, "log").with_details(
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
        WitElement::new(ElementId::intern("level"), WitKind::Enum, "level").with_details(
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

    for (id, from, to, rel) in [
        ("c1", "pkg", "world", WitRelation::Contains),
        ("c2", "world", "logging", WitRelation::Contains),
        ("c3", "logging", "log", WitRelation::Contains),
        ("c4", "log", "level", WitRelation::TypeReference),
    ] {
        g.push_connection(WitConnection::new(
            ElementId::intern(id),
            ElementId::intern(from),
            ElementId::intern(to),
            rel,
        ));
    }

    g
}

fn main() {
    env_logger::init();

    let mut engine = DiagramEngine::new(Size::new(1280.0, 720.0));
    engine.on_model_change(Box::new(|model| {
        println!(
            "model changed: {} nodes, {} edges",
            model.node_count(),
            model.edge_count()
        );
    }));
    engine.on_element_interact(Box::new(|id| {
        println!("element activated: {id}");
    }));

    engine.load(&sample_graph());
    engine.zoom_to_fit();

    for diag in engine.validate() {
        println!("[{:?}] {} ({})", diag.severity, diag.message, diag.rule);
    }

    // Hover the interface node long enough for its tooltip.
    let interface_center = {
        let bounds = engine
            .model()
            .get_node(ElementId::intern("logging"))
            .expect("interface node")
            .bounds;
        let world = kurbo::Point::new(
            (bounds.x + bounds.width / 2.0) as f64,
            (bounds.y + bounds.height / 2.0) as f64,
        );
        engine.viewport().world_to_screen(world)
    };

    let t0 = Instant::now();
    engine.handle_input(
        &InputEvent::PointerMove {
            x: interface_center.x,
            y: interface_center.y,
        },
        t0,
    );
    engine.tick(t0 + DEBOUNCE_INTERVAL);
    engine.tick(t0 + DEBOUNCE_INTERVAL + TOOLTIP_DELAY + Duration::from_millis(1));

    println!("hovered: {:?}", engine.hovered());
    println!("related: {:?}", engine.related());
    if let Some(tip) = engine.tooltip() {
        println!("tooltip: {} ({}) at {:?}", tip.title, tip.kind, tip.position);
    }

    // Activate it from the keyboard.
    engine.handle_input(&InputEvent::key("Enter"), t0 + Duration::from_millis(500));

    // Collapse everything, then re-expand to level 3.
    engine.set_expand_level(0);
    engine.set_expand_level(3);
    println!("expanded containers: {}", engine.expansion().len());
}
