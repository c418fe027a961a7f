//! Structural validation of a diagram model.
//!
//! Reports issues without modifying the model. A model with errors still
//! renders — the paint and picking passes skip dangling edges — but
//! collaborators should surface the diagnostics to the user.

use crate::id::ElementId;
use crate::model::DiagramModel;
use std::collections::HashMap;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The diagram is structurally invalid (but still renderable).
    Error,
    /// Suspicious but non-fatal.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The element this finding refers to.
    pub element: ElementId,
    /// Human-readable message.
    pub message: String,
    pub severity: Severity,
    /// Short rule identifier (e.g. "dangling-edge", "duplicate-name").
    pub rule: &'static str,
}

/// Run all validation rules and return findings.
#[must_use]
pub fn validate(model: &DiagramModel) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    check_dangling_edges(model, &mut diags);
    check_duplicate_names(model, &mut diags);
    diags
}

/// True when the model has no `Severity::Error` findings.
pub fn is_structurally_valid(model: &DiagramModel) -> bool {
    validate(model)
        .iter()
        .all(|d| d.severity != Severity::Error)
}

// ─── Rules ───────────────────────────────────────────────────────────────

/// Error on any edge whose source or target id is not a node in the arena.
fn check_dangling_edges(model: &DiagramModel, diags: &mut Vec<Diagnostic>) {
    for edge in model.edges() {
        for endpoint in [edge.source, edge.target] {
            if model.get_node(endpoint).is_none() {
                diags.push(Diagnostic {
                    element: edge.id,
                    message: format!(
                        "Edge `{}` references missing element `{endpoint}` — it will not be drawn or picked.",
                        edge.id
                    ),
                    severity: Severity::Error,
                    rule: "dangling-edge",
                });
            }
        }
    }
}

/// Warn when two nodes of the same semantic kind share a display name.
fn check_duplicate_names(model: &DiagramModel, diags: &mut Vec<Diagnostic>) {
    let mut seen: HashMap<(String, String), ElementId> = HashMap::new();

    for node in model.nodes() {
        let Some(name) = node.prop_str("name") else {
            continue;
        };
        let key = (node.element_type.clone(), name.to_owned());
        match seen.get(&key) {
            Some(first) => diags.push(Diagnostic {
                element: node.id,
                message: format!(
                    "Duplicate {} name `{name}` — also used by `{first}`.",
                    node.element_type
                ),
                severity: Severity::Warning,
                rule: "duplicate-name",
            }),
            None => {
                seen.insert(key, node.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::to_diagram;
    use crate::model::{Edge, Element};
    use crate::wit::{WitElement, WitGraph, WitKind};

    #[test]
    fn dangling_edge_is_an_error() {
        let mut g = WitGraph::new(ElementId::intern("v-g"), "g", "c");
        g.push_element(WitElement::new(ElementId::intern("v-a"), WitKind::Interface, "a"));
        let mut model = to_diagram(&g);
        model.insert(Element::Edge(Edge::new(
            ElementId::intern("v-e"),
            "uses",
            ElementId::intern("v-a"),
            ElementId::intern("v-ghost"),
        )));

        let diags = validate(&model);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "dangling-edge");
        assert_eq!(diags[0].severity, Severity::Error);
        assert!(!is_structurally_valid(&model));
    }

    #[test]
    fn duplicate_names_same_kind_warn() {
        let mut g = WitGraph::new(ElementId::intern("v-g2"), "g", "c");
        g.push_element(WitElement::new(ElementId::intern("v-f1"), WitKind::Function, "log"));
        g.push_element(WitElement::new(ElementId::intern("v-f2"), WitKind::Function, "log"));
        let model = to_diagram(&g);

        let diags = validate(&model);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "duplicate-name");
        assert_eq!(diags[0].severity, Severity::Warning);
        // Warnings don't make the diagram invalid.
        assert!(is_structurally_valid(&model));
    }

    #[test]
    fn same_name_across_kinds_is_fine() {
        let mut g = WitGraph::new(ElementId::intern("v-g3"), "g", "c");
        g.push_element(WitElement::new(ElementId::intern("v-i"), WitKind::Interface, "logger"));
        g.push_element(WitElement::new(ElementId::intern("v-r"), WitKind::Resource, "logger"));
        let model = to_diagram(&g);
        assert!(validate(&model).is_empty());
    }

    #[test]
    fn clean_model_has_no_findings() {
        let mut g = WitGraph::new(ElementId::intern("v-g4"), "g", "c");
        g.push_element(WitElement::new(ElementId::intern("v-x"), WitKind::World, "host"));
        let model = to_diagram(&g);
        assert!(validate(&model).is_empty());
    }
}
