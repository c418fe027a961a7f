//! Generic diagram model — the arena every other subsystem reads.
//!
//! Elements live in one map keyed by interned id; edges reference nodes by
//! id rather than by pointer, so deleting a node sweeps the edges that
//! mention it instead of leaving dangling references. Draw order is an
//! explicit list (last entry paints topmost) because both the paint pass
//! and hit-testing depend on it.

use crate::id::ElementId;
use crate::view::ViewConfig;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in world (diagram) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A node's width and height in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn from_position_size(position: Point, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if this bounds intersects with another rectangle (AABB overlap).
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Smallest bounds covering both rectangles.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Bounds {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// Free-form property bag carried by every node and edge.
///
/// Keys and value shapes are owned by the adapter; the renderer only ever
/// reads from it and falls back to blanks for anything missing.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A box on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: ElementId,
    /// Generic type tag, e.g. `"interface"`. Free-form on purpose: unknown
    /// tags from evolving external schemas render with the fallback style.
    pub element_type: String,
    pub position: Point,
    pub size: Size,
    /// Cached `position + size`. Kept in sync by the mutators below; also
    /// serialized so collaborators don't recompute it.
    pub bounds: Bounds,
    pub properties: Properties,
}

impl Node {
    pub fn new(id: ElementId, element_type: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id,
            element_type: element_type.into(),
            position,
            size,
            bounds: Bounds::from_position_size(position, size),
            properties: Properties::new(),
        }
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
        self.bounds = Bounds::from_position_size(self.position, self.size);
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.bounds = Bounds::from_position_size(self.position, self.size);
    }

    /// String property lookup with the blank-on-missing renderer contract.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    pub fn prop_u64(&self, key: &str) -> Option<u64> {
        self.properties.get(key).and_then(|v| v.as_u64())
    }
}

/// A connection between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: ElementId,
    pub element_type: String,
    pub source: ElementId,
    pub target: ElementId,
    /// Explicit routing points in world coordinates. Empty means the
    /// renderer picks the path (straight or curved).
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub routing_points: SmallVec<[Point; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl Edge {
    pub fn new(
        id: ElementId,
        element_type: impl Into<String>,
        source: ElementId,
        target: ElementId,
    ) -> Self {
        Self {
            id,
            element_type: element_type.into(),
            source,
            target,
            routing_points: SmallVec::new(),
            label: None,
            properties: Properties::new(),
        }
    }

    /// Whether this edge references the given node as either endpoint.
    pub fn touches(&self, id: ElementId) -> bool {
        self.source == id || self.target == id
    }
}

/// Tagged union stored in the element arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Edge(Edge),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Node(n) => n.id,
            Element::Edge(e) => e.id,
        }
    }

    pub fn element_type(&self) -> &str {
        match self {
            Element::Node(n) => &n.element_type,
            Element::Edge(e) => &e.element_type,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(n) => Some(n),
            Element::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Element::Edge(e) => Some(e),
            Element::Node(_) => None,
        }
    }
}

// ─── Diagram metadata ────────────────────────────────────────────────────

/// Diagram-level context carried alongside the element arena.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramMetadata {
    pub name: String,
    /// Id of the semantic graph this diagram was converted from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_graph: Option<ElementId>,
    /// Component name of the originating graph, carried for the reverse
    /// conversion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    pub view_config: ViewConfig,
}

// ─── The model ───────────────────────────────────────────────────────────

/// The complete diagram — elements keyed by id plus an explicit draw order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramModel {
    pub id: ElementId,
    pub diagram_type: String,
    pub elements: HashMap<ElementId, Element>,
    /// Paint order: first entry paints first, last entry paints topmost.
    pub draw_order: Vec<ElementId>,
    pub metadata: DiagramMetadata,
}

impl DiagramModel {
    pub fn new(id: ElementId, diagram_type: impl Into<String>) -> Self {
        Self {
            id,
            diagram_type: diagram_type.into(),
            elements: HashMap::new(),
            draw_order: Vec::new(),
            metadata: DiagramMetadata::default(),
        }
    }

    /// Insert an element at the top of the draw order.
    ///
    /// Returns `false` (and leaves the model untouched) when the id is
    /// already taken — id uniqueness is the adapter's invariant and a
    /// duplicate here means the caller's graph is malformed.
    pub fn insert(&mut self, element: Element) -> bool {
        let id = element.id();
        if self.elements.contains_key(&id) {
            return false;
        }
        self.elements.insert(id, element);
        self.draw_order.push(id);
        true
    }

    /// Remove an element. Removing a node also sweeps every edge that
    /// references it, so the arena never holds edges with known-dead
    /// endpoints after a local delete.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&id)?;
        self.draw_order.retain(|eid| *eid != id);

        if matches!(removed, Element::Node(_)) {
            let swept: Vec<ElementId> = self
                .elements
                .values()
                .filter_map(|e| e.as_edge())
                .filter(|e| e.touches(id))
                .map(|e| e.id)
                .collect();
            for edge_id in swept {
                self.elements.remove(&edge_id);
                self.draw_order.retain(|eid| *eid != edge_id);
            }
        }

        Some(removed)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_node(&self, id: ElementId) -> Option<&Node> {
        self.elements.get(&id).and_then(Element::as_node)
    }

    pub fn get_node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        match self.elements.get_mut(&id) {
            Some(Element::Node(n)) => Some(n),
            _ => None,
        }
    }

    pub fn get_edge(&self, id: ElementId) -> Option<&Edge> {
        self.elements.get(&id).and_then(Element::as_edge)
    }

    /// Nodes in draw order (bottom to top).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.draw_order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter_map(Element::as_node)
    }

    /// Edges in draw order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.draw_order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter_map(Element::as_edge)
    }

    pub fn node_count(&self) -> usize {
        self.elements
            .values()
            .filter(|e| matches!(e, Element::Node(_)))
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.elements
            .values()
            .filter(|e| matches!(e, Element::Edge(_)))
            .count()
    }

    /// Union of all node bounds, for zoom-to-fit. `None` when empty.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.nodes()
            .map(|n| n.bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}
