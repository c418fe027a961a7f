//! Keyboard shortcut mapping and element navigation.
//!
//! Shortcuts resolve key + modifier combos into semantic actions; the
//! navigation helpers move the hovered element through the visible node
//! list in draw order, so every element is reachable without a pointer.

use crate::input::Modifiers;
use wv_core::model::DiagramModel;
use wv_core::{ElementId, ViewConfig};
use wv_render::hit::node_visible;

/// Actions that keyboard input can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // ── Hover navigation ──
    NavNext,
    NavPrev,
    NavFirst,
    NavLast,
    /// Activate the hovered element (emits the element-interact signal).
    Interact,
    /// Clear hover/tooltip/highlight state.
    Cancel,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ZoomToFit,
}

/// Resolves key events into actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘, on
/// other platforms `ctrl` serves the same role.
pub struct Shortcuts;

impl Shortcuts {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"ArrowRight"`,
    /// `"Enter"`). Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<Action> {
        if modifiers.command() {
            return match key {
                "=" | "+" => Some(Action::ZoomIn),
                "-" => Some(Action::ZoomOut),
                "0" => Some(Action::ZoomToFit),
                _ => None,
            };
        }

        match key {
            "ArrowRight" | "ArrowDown" => Some(Action::NavNext),
            "ArrowLeft" | "ArrowUp" => Some(Action::NavPrev),
            "Home" => Some(Action::NavFirst),
            "End" => Some(Action::NavLast),
            "Enter" | " " => Some(Action::Interact),
            "Escape" => Some(Action::Cancel),
            _ => None,
        }
    }
}

/// Visible nodes in draw order — the navigation array.
fn nav_order(model: &DiagramModel, view: &ViewConfig) -> Vec<ElementId> {
    model
        .nodes()
        .filter(|n| node_visible(n, view))
        .map(|n| n.id)
        .collect()
}

/// Compute the next hovered element for a navigation action.
///
/// `NavNext`/`NavPrev` clamp at the ends of the list; with no current
/// hover they start from the first / last element respectively.
pub fn navigate(
    model: &DiagramModel,
    view: &ViewConfig,
    current: Option<ElementId>,
    action: Action,
) -> Option<ElementId> {
    let order = nav_order(model, view);
    if order.is_empty() {
        return None;
    }

    let pos = current.and_then(|id| order.iter().position(|&o| o == id));
    let index = match (action, pos) {
        (Action::NavFirst, _) => 0,
        (Action::NavLast, _) => order.len() - 1,
        (Action::NavNext, None) => 0,
        (Action::NavNext, Some(p)) => (p + 1).min(order.len() - 1),
        (Action::NavPrev, None) => order.len() - 1,
        (Action::NavPrev, Some(p)) => p.saturating_sub(1),
        _ => return current,
    };
    Some(order[index])
}
