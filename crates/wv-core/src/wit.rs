//! Semantic WIT graph — the domain side of the adapter.
//!
//! Mirrors the element/connection shape produced by WIT component
//! introspection: packages contain worlds, worlds contain interfaces,
//! interfaces contain functions, types, and resources. Kind and relation
//! tags are closed enums here; the generic diagram side keeps them as
//! strings so unknown tags from newer schemas degrade instead of failing.

use crate::id::ElementId;
use crate::model::{Point, Size};
use crate::view::ViewConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Kind tags ───────────────────────────────────────────────────────────

/// Closed element-kind tag of the WIT type graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WitKind {
    Package,
    World,
    Interface,
    Function,
    Record,
    Variant,
    Enum,
    Flags,
    Resource,
    Import,
    Export,
    Primitive,
    List,
    Tuple,
    Option,
    Result,
}

impl WitKind {
    pub const ALL: &'static [WitKind] = &[
        WitKind::Package,
        WitKind::World,
        WitKind::Interface,
        WitKind::Function,
        WitKind::Record,
        WitKind::Variant,
        WitKind::Enum,
        WitKind::Flags,
        WitKind::Resource,
        WitKind::Import,
        WitKind::Export,
        WitKind::Primitive,
        WitKind::List,
        WitKind::Tuple,
        WitKind::Option,
        WitKind::Result,
    ];

    /// The stable tag written into diagram property bags.
    pub fn as_str(&self) -> &'static str {
        match self {
            WitKind::Package => "package",
            WitKind::World => "world",
            WitKind::Interface => "interface",
            WitKind::Function => "function",
            WitKind::Record => "record",
            WitKind::Variant => "variant",
            WitKind::Enum => "enum",
            WitKind::Flags => "flags",
            WitKind::Resource => "resource",
            WitKind::Import => "import",
            WitKind::Export => "export",
            WitKind::Primitive => "primitive",
            WitKind::List => "list",
            WitKind::Tuple => "tuple",
            WitKind::Option => "option",
            WitKind::Result => "result",
        }
    }

    /// Parse a tag. `None` for anything outside the closed set — callers
    /// decide the fallback (the adapter substitutes `Interface`).
    pub fn from_tag(tag: &str) -> Option<WitKind> {
        WitKind::ALL.iter().copied().find(|k| k.as_str() == tag)
    }

    /// Container kinds can visually expand to reveal children.
    pub fn is_container(&self) -> bool {
        matches!(self, WitKind::Package | WitKind::World | WitKind::Interface)
    }
}

impl fmt::Display for WitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Relation tags ───────────────────────────────────────────────────────

/// Closed relation tag of a semantic connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WitRelation {
    Import,
    Export,
    Uses,
    Implements,
    Contains,
    TypeReference,
    Dependency,
}

impl WitRelation {
    pub const ALL: &'static [WitRelation] = &[
        WitRelation::Import,
        WitRelation::Export,
        WitRelation::Uses,
        WitRelation::Implements,
        WitRelation::Contains,
        WitRelation::TypeReference,
        WitRelation::Dependency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WitRelation::Import => "import",
            WitRelation::Export => "export",
            WitRelation::Uses => "uses",
            WitRelation::Implements => "implements",
            WitRelation::Contains => "contains",
            WitRelation::TypeReference => "type-reference",
            WitRelation::Dependency => "dependency",
        }
    }

    pub fn from_tag(tag: &str) -> Option<WitRelation> {
        WitRelation::ALL.iter().copied().find(|r| r.as_str() == tag)
    }
}

impl fmt::Display for WitRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Per-kind details ────────────────────────────────────────────────────

/// A named, typed slot — a function parameter or a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub ty: String,
}

impl NamedType {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Kind-dependent payload of a semantic element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum WitDetails {
    #[default]
    None,
    Package {
        worlds: Vec<String>,
        interfaces: Vec<String>,
    },
    World {
        imports: Vec<String>,
        exports: Vec<String>,
    },
    Interface {
        functions: Vec<String>,
        types: Vec<String>,
        resources: Vec<String>,
    },
    Function {
        params: Vec<NamedType>,
        results: Vec<String>,
    },
    Resource {
        methods: Vec<String>,
    },
    Record {
        fields: Vec<NamedType>,
    },
    /// Variant, enum, and flags all carry a flat case list.
    Cases {
        cases: Vec<String>,
    },
}

// ─── Elements and connections ────────────────────────────────────────────

/// One element of the semantic graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitElement {
    pub id: ElementId,
    pub kind: WitKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default)]
    pub details: WitDetails,
}

impl WitElement {
    pub fn new(id: ElementId, kind: WitKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            position: None,
            size: None,
            docs: None,
            details: WitDetails::None,
        }
    }

    pub fn with_details(mut self, details: WitDetails) -> Self {
        self.details = details;
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }
}

/// One connection of the semantic graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitConnection {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
    pub relation: WitRelation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl WitConnection {
    pub fn new(
        id: ElementId,
        source: ElementId,
        target: ElementId,
        relation: WitRelation,
    ) -> Self {
        Self {
            id,
            source,
            target,
            relation,
            label: None,
        }
    }
}

// ─── The graph ───────────────────────────────────────────────────────────

/// The complete semantic graph for one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitGraph {
    pub id: ElementId,
    pub name: String,
    pub component_name: String,
    pub elements: Vec<WitElement>,
    pub connections: Vec<WitConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_config: Option<ViewConfig>,
}

impl WitGraph {
    pub fn new(id: ElementId, name: impl Into<String>, component_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            component_name: component_name.into(),
            elements: Vec::new(),
            connections: Vec::new(),
            view_config: None,
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&WitElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn push_element(&mut self, element: WitElement) {
        self.elements.push(element);
    }

    pub fn push_connection(&mut self, connection: WitConnection) {
        self.connections.push(connection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_roundtrip() {
        for kind in WitKind::ALL {
            assert_eq!(WitKind::from_tag(kind.as_str()), Some(*kind));
        }
        assert_eq!(WitKind::from_tag("struct"), None);
    }

    #[test]
    fn relation_tag_roundtrip() {
        for rel in WitRelation::ALL {
            assert_eq!(WitRelation::from_tag(rel.as_str()), Some(*rel));
        }
        assert_eq!(WitRelation::from_tag("aggregates"), None);
    }

    #[test]
    fn containers_are_the_three_nesting_kinds() {
        let containers: Vec<_> = WitKind::ALL.iter().filter(|k| k.is_container()).collect();
        assert_eq!(
            containers,
            vec![&WitKind::Package, &WitKind::World, &WitKind::Interface]
        );
    }

    #[test]
    fn graph_wire_shape_uses_camel_case() {
        let g = WitGraph::new(ElementId::intern("g1"), "logging", "wasi:logging");
        let json = serde_json::to_value(&g).unwrap();
        assert!(json.get("componentName").is_some());
        assert!(json.get("elements").is_some());
        assert!(json.get("connections").is_some());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_value(WitRelation::TypeReference).unwrap();
        assert_eq!(json, "type-reference");
    }
}
