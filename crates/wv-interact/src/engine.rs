//! The diagram engine: one struct owning every piece of mutable state.
//!
//! Collaborators never hold references into the model — they call the
//! operations here and listen for change callbacks. Everything runs on
//! the caller's thread; the only deferral is the timer state inside the
//! hover tracker, driven by `tick(now)`.
//!
//! Listener contract: callbacks receive `&DiagramModel` and may read
//! freely, but must defer further engine mutation to the next event tick
//! (the borrow makes re-entrant mutation impossible to express anyway).

use crate::hover::HoverTracker;
use crate::input::InputEvent;
use crate::keyboard::{Action, Shortcuts, navigate};
use kurbo::{Point, Size, Vec2};
use std::collections::HashSet;
use std::time::Instant;
use wv_core::adapter::{connection_to_edge, element_to_node, to_diagram, to_semantic};
use wv_core::model::{DiagramModel, Element};
use wv_core::validate::{Diagnostic, validate};
use wv_core::{
    CoreError, ElementId, ExpansionSet, Hierarchy, ViewConfig, WitConnection, WitElement, WitGraph,
};
use wv_render::Viewport;
use wv_render::hit::{PickTarget, node_visible, pick};

/// Zoom step for keyboard zoom in/out.
const KEY_ZOOM_STEP: f64 = 1.2;
/// Margin around content for zoom-to-fit, in screen pixels.
const FIT_MARGIN: f64 = 40.0;

pub type ModelListener = Box<dyn FnMut(&DiagramModel)>;
pub type InteractListener = Box<dyn FnMut(ElementId)>;

/// A hover tooltip resolved into collaborator-facing terms.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub id: ElementId,
    /// Display name of the element (id when the bag has no name).
    pub title: String,
    /// The element's type tag.
    pub kind: String,
    /// Containment breadcrumb, outermost first (e.g.
    /// `"wasi:logging › logging"`). Empty for top-level elements.
    pub context: Option<String>,
    pub docs: Option<String>,
    /// Where to place the tooltip, in screen coordinates.
    pub position: Point,
}

pub struct DiagramEngine {
    model: DiagramModel,
    viewport: Viewport,
    hover: HoverTracker,
    expansion: ExpansionSet,
    hierarchy: Hierarchy,
    /// Drawing surface size in screen pixels.
    screen: Size,
    /// Last raw pointer position, for zoom anchoring.
    last_pointer: Option<Point>,
    model_listeners: Vec<ModelListener>,
    interact_listeners: Vec<InteractListener>,
}

impl DiagramEngine {
    pub fn new(screen: Size) -> Self {
        Self {
            model: DiagramModel::new(ElementId::intern("empty"), wv_core::DIAGRAM_TYPE),
            viewport: Viewport::new(),
            hover: HoverTracker::new(),
            expansion: ExpansionSet::default(),
            hierarchy: Hierarchy::default(),
            screen,
            last_pointer: None,
            model_listeners: Vec::new(),
            interact_listeners: Vec::new(),
        }
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Convert and install a semantic graph, replacing the current
    /// diagram wholesale. Hover, expansion, and viewport state reset.
    pub fn load(&mut self, graph: &WitGraph) {
        self.model = to_diagram(graph);
        self.hierarchy = Hierarchy::from_model(&self.model);
        self.hover.clear();
        self.viewport = Viewport::new();
        self.last_pointer = None;

        let level = self.model.metadata.view_config.expand_level;
        self.expansion.set_level(&self.model, level);

        log::debug!(
            "loaded diagram `{}`: {} nodes, {} edges",
            self.model.id,
            self.model.node_count(),
            self.model.edge_count()
        );
        self.notify_model_changed();
    }

    /// Read the current diagram back as a semantic graph.
    pub fn to_semantic(&self) -> WitGraph {
        to_semantic(&self.model)
    }

    // ─── Element operations ──────────────────────────────────────────────

    /// Add a semantic element to the loaded diagram.
    pub fn create_element(&mut self, element: &WitElement) -> Result<ElementId, CoreError> {
        if self.model.get(element.id).is_some() {
            return Err(CoreError::DuplicateId(element.id));
        }
        let node = element_to_node(element, self.model.node_count());
        self.model.insert(Element::Node(node));
        self.hierarchy = Hierarchy::from_model(&self.model);
        self.notify_model_changed();
        Ok(element.id)
    }

    /// Add a semantic connection. Both endpoints must already exist —
    /// dangling edges are never created locally (external data may still
    /// contain them; `validate` reports those).
    pub fn create_connection(&mut self, connection: &WitConnection) -> Result<ElementId, CoreError> {
        if self.model.get(connection.id).is_some() {
            return Err(CoreError::DuplicateId(connection.id));
        }
        for endpoint in [connection.source, connection.target] {
            if self.model.get_node(endpoint).is_none() {
                return Err(CoreError::MissingEndpoint {
                    id: connection.id,
                    endpoint,
                });
            }
        }
        self.model.insert(Element::Edge(connection_to_edge(connection)));
        self.hierarchy = Hierarchy::from_model(&self.model);
        self.notify_model_changed();
        Ok(connection.id)
    }

    /// Delete an element. Deleting a node sweeps the edges touching it.
    pub fn delete_element(&mut self, id: ElementId) -> Result<(), CoreError> {
        if self.model.remove(id).is_none() {
            return Err(CoreError::NotFound(id));
        }
        if self.hover.hovered() == Some(id) {
            self.hover.clear();
        }
        self.hierarchy = Hierarchy::from_model(&self.model);
        self.notify_model_changed();
        Ok(())
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Feed one normalized input event into the engine.
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) {
        match event {
            InputEvent::PointerMove { x, y } => {
                let screen = Point::new(*x, *y);
                self.last_pointer = Some(screen);
                let world = self.viewport.screen_to_world(screen);
                self.hover.pointer_moved(world, now);
            }

            InputEvent::PointerDown { x, y, .. } => {
                let world = self.viewport.screen_to_world(Point::new(*x, *y));
                let target = pick(
                    &self.model,
                    &self.model.metadata.view_config,
                    world.x as f32,
                    world.y as f32,
                );
                match target {
                    Some(PickTarget::Expander(id)) => self.toggle_expansion(id),
                    Some(PickTarget::Node(id)) => {
                        // Click hovers immediately, skipping the debounce.
                        self.hover.set_hovered(Some(id), &self.model);
                    }
                    None => self.hover.clear(),
                }
            }

            InputEvent::PointerLeave => {
                self.last_pointer = None;
                self.hover.clear();
            }

            InputEvent::Scroll { dx, dy, zoom } => {
                if (*zoom - 1.0).abs() > f64::EPSILON {
                    let anchor = self.last_pointer.unwrap_or(self.screen_center());
                    self.viewport.zoom_by(*zoom, anchor);
                } else {
                    self.viewport.pan_by(Vec2::new(*dx, *dy));
                }
            }

            InputEvent::Key { key, modifiers } => {
                if let Some(action) = Shortcuts::resolve(key, *modifiers) {
                    self.perform(action);
                }
            }
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::NavNext | Action::NavPrev | Action::NavFirst | Action::NavLast => {
                let next = navigate(
                    &self.model,
                    &self.model.metadata.view_config,
                    self.hover.hovered(),
                    action,
                );
                if next.is_some() {
                    self.hover.set_hovered(next, &self.model);
                }
            }
            Action::Interact => {
                if let Some(id) = self.hover.hovered() {
                    self.emit_interact(id);
                }
            }
            Action::Cancel => self.hover.clear(),
            Action::ZoomIn => self.viewport.zoom_by(KEY_ZOOM_STEP, self.screen_center()),
            Action::ZoomOut => self.viewport.zoom_by(1.0 / KEY_ZOOM_STEP, self.screen_center()),
            Action::ZoomToFit => self.zoom_to_fit(),
        }
    }

    /// Advance timers. Returns true when the host should repaint.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.hover
            .tick(now, &self.model, &self.model.metadata.view_config)
    }

    /// Earliest instant at which `tick` could do work.
    pub fn next_wake(&self) -> Option<Instant> {
        self.hover.next_wake()
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    fn screen_center(&self) -> Point {
        Point::new(self.screen.width / 2.0, self.screen.height / 2.0)
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    pub fn zoom_to_fit(&mut self) {
        if let Some(content) = self.model.content_bounds() {
            self.viewport.zoom_to_fit(content, self.screen, FIT_MARGIN);
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan_by(delta);
    }

    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        self.viewport.zoom_by(factor, anchor);
    }

    // ─── Expansion ───────────────────────────────────────────────────────

    /// Recompute the expansion set for a level (see `ExpansionSet`).
    pub fn set_expand_level(&mut self, level: i32) {
        self.model.metadata.view_config.expand_level = level;
        self.expansion.set_level(&self.model, level);
    }

    pub fn toggle_expansion(&mut self, id: ElementId) {
        let expanded = self.expansion.toggle(id);
        log::debug!("{} {}", id, if expanded { "expanded" } else { "collapsed" });
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    // ─── View configuration ──────────────────────────────────────────────

    pub fn view_config(&self) -> &ViewConfig {
        &self.model.metadata.view_config
    }

    /// Replace the view configuration. A hovered element that just became
    /// hidden is un-hovered so no invisible element keeps highlights.
    pub fn set_view_config(&mut self, config: ViewConfig) {
        self.model.metadata.view_config = config;
        if let Some(id) = self.hover.hovered() {
            let still_visible = self
                .model
                .get_node(id)
                .is_some_and(|n| node_visible(n, &self.model.metadata.view_config));
            if !still_visible {
                self.hover.clear();
            }
        }
    }

    // ─── State queries ───────────────────────────────────────────────────

    pub fn model(&self) -> &DiagramModel {
        &self.model
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hover.hovered()
    }

    pub fn related(&self) -> &HashSet<ElementId> {
        self.hover.related()
    }

    pub fn tooltip(&self) -> Option<TooltipInfo> {
        let tip = self.hover.tooltip(&self.model)?;
        let node = self.model.get_node(tip.id)?;
        Some(TooltipInfo {
            id: tip.id,
            title: node
                .prop_str("name")
                .unwrap_or(tip.id.as_str())
                .to_owned(),
            kind: node.element_type.clone(),
            context: self.containment_path(tip.id),
            docs: node.prop_str("docs").map(str::to_owned),
            position: self.viewport.world_to_screen(tip.anchor),
        })
    }

    /// Walk the containment index up from `id` and render the ancestor
    /// names outermost-first.
    fn containment_path(&self, id: ElementId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.hierarchy.parent(current) {
            let name = self
                .model
                .get_node(parent)
                .and_then(|n| n.prop_str("name"))
                .unwrap_or(parent.as_str());
            names.push(name.to_owned());
            current = parent;
        }
        if names.is_empty() {
            return None;
        }
        names.reverse();
        Some(names.join(" \u{203A} "))
    }

    pub fn validate(&self) -> Vec<Diagnostic> {
        validate(&self.model)
    }

    // ─── Listeners ───────────────────────────────────────────────────────

    /// Register a callback invoked with the model after any
    /// create/delete/load operation.
    pub fn on_model_change(&mut self, listener: ModelListener) {
        self.model_listeners.push(listener);
    }

    /// Register a callback for keyboard activation of the hovered
    /// element (Enter / Space).
    pub fn on_element_interact(&mut self, listener: InteractListener) {
        self.interact_listeners.push(listener);
    }

    fn notify_model_changed(&mut self) {
        let model = &self.model;
        for listener in &mut self.model_listeners {
            listener(model);
        }
    }

    fn emit_interact(&mut self, id: ElementId) {
        for listener in &mut self.interact_listeners {
            listener(id);
        }
    }
}
