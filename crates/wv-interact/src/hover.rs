//! Hover and tooltip state machine.
//!
//! Phases: `Idle` → `Hovering(id)` → `TooltipPending(id)` →
//! `TooltipVisible(id)`. Pointer samples are debounced at a fixed short
//! interval (the last sample in a window wins), the tooltip appears after
//! a fixed delay on one element, and any hover change cancels and
//! re-arms the pending tooltip. All timing flows through `tick(now)` —
//! the machine never reads the clock itself.

use crate::related::related_elements;
use crate::timer::Deadline;
use kurbo::Point;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use wv_core::model::DiagramModel;
use wv_core::{ElementId, ViewConfig};
use wv_render::hit;

/// Delay before a tooltip appears over a freshly hovered element.
pub const TOOLTIP_DELAY: Duration = Duration::from_millis(300);
/// Pointer-move debounce window; samples inside it collapse to the last.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(40);

/// Where the machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Idle,
    /// An element is hovered; the tooltip delay has not been armed yet.
    Hovering(ElementId),
    /// Tooltip delay armed and counting.
    TooltipPending(ElementId),
    /// Tooltip shown; it repositions with the pointer without re-delay.
    TooltipVisible(ElementId),
}

impl HoverPhase {
    pub fn hovered(&self) -> Option<ElementId> {
        match self {
            HoverPhase::Idle => None,
            HoverPhase::Hovering(id)
            | HoverPhase::TooltipPending(id)
            | HoverPhase::TooltipVisible(id) => Some(*id),
        }
    }
}

/// A tooltip ready for the embedding to place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooltip {
    pub id: ElementId,
    /// World-space anchor: the pointer when one is active, otherwise the
    /// element's bottom edge (keyboard-driven hover).
    pub anchor: Point,
}

#[derive(Debug)]
pub struct HoverTracker {
    phase: HoverPhase,
    related: HashSet<ElementId>,
    /// Latest raw pointer position in world coordinates.
    pointer: Option<Point>,
    /// Last sample inside the open debounce window.
    pending_sample: Option<Point>,
    debounce: Deadline,
    tooltip_delay: Deadline,
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self {
            phase: HoverPhase::Idle,
            related: HashSet::new(),
            pointer: None,
            pending_sample: None,
            debounce: Deadline::default(),
            tooltip_delay: Deadline::default(),
        }
    }
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.phase.hovered()
    }

    pub fn related(&self) -> &HashSet<ElementId> {
        &self.related
    }

    /// Record a pointer sample. Opens a debounce window on the first
    /// sample; later samples inside the window replace the pending one,
    /// so only the last position takes effect when the window closes.
    pub fn pointer_moved(&mut self, world: Point, now: Instant) {
        self.pointer = Some(world);
        self.pending_sample = Some(world);
        if !self.debounce.is_armed() {
            self.debounce.arm(now, DEBOUNCE_INTERVAL);
        }
    }

    /// Set the hovered element directly, bypassing pointer debounce —
    /// the keyboard navigation path. Passing `None` drops to idle.
    pub fn set_hovered(&mut self, id: Option<ElementId>, model: &DiagramModel) -> bool {
        self.pointer = None;
        // A stale pointer sample must not override the keyboard choice.
        self.pending_sample = None;
        self.debounce.cancel();
        self.apply_hover(id, model)
    }

    /// Force idle: pointer left the surface or the user hit Escape.
    /// Clears hover, related highlights, and any pending tooltip.
    pub fn clear(&mut self) {
        self.phase = HoverPhase::Idle;
        self.related.clear();
        self.pointer = None;
        self.pending_sample = None;
        self.debounce.cancel();
        self.tooltip_delay.cancel();
    }

    /// Advance the machine. Returns true when visible state changed and
    /// the host should repaint.
    pub fn tick(&mut self, now: Instant, model: &DiagramModel, view: &ViewConfig) -> bool {
        let mut changed = false;

        // Close the debounce window: resolve the surviving sample.
        if self.debounce.fire(now)
            && let Some(sample) = self.pending_sample.take()
        {
            let hit = hit::hit_test(model, view, sample.x as f32, sample.y as f32);
            changed |= self.apply_hover(hit, model);
        }

        // A fresh hover arms the tooltip delay.
        if let HoverPhase::Hovering(id) = self.phase {
            self.tooltip_delay.arm(now, TOOLTIP_DELAY);
            self.phase = HoverPhase::TooltipPending(id);
            changed = true;
        }

        // Delay expired with the pointer still on the same element.
        if self.tooltip_delay.fire(now)
            && let HoverPhase::TooltipPending(id) = self.phase
        {
            self.phase = HoverPhase::TooltipVisible(id);
            changed = true;
        }

        changed
    }

    /// The visible tooltip, if any. Repositioning with the pointer falls
    /// out of the anchor being read fresh on every call.
    pub fn tooltip(&self, model: &DiagramModel) -> Option<Tooltip> {
        let HoverPhase::TooltipVisible(id) = self.phase else {
            return None;
        };
        let anchor = self.pointer.or_else(|| {
            let b = model.get_node(id)?.bounds;
            Some(Point::new(
                (b.x + b.width / 2.0) as f64,
                (b.y + b.height) as f64,
            ))
        })?;
        Some(Tooltip { id, anchor })
    }

    /// Earliest instant at which `tick` could change state, for hosts
    /// that schedule wakeups instead of polling every frame.
    pub fn next_wake(&self) -> Option<Instant> {
        match (self.debounce.next_wake(), self.tooltip_delay.next_wake()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Transition to a new hovered element (or none). Any change tears
    /// down the previous tooltip and recomputes related highlights.
    fn apply_hover(&mut self, hit: Option<ElementId>, model: &DiagramModel) -> bool {
        if hit == self.hovered() {
            return false;
        }
        self.tooltip_delay.cancel();
        self.related.clear();

        match hit {
            Some(id) => {
                self.phase = HoverPhase::Hovering(id);
                self.related = related_elements(model, id);
            }
            None => self.phase = HoverPhase::Idle,
        }
        true
    }
}
