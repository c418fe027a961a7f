pub mod engine;
pub mod hover;
pub mod input;
pub mod keyboard;
pub mod related;
pub mod timer;

pub use engine::{DiagramEngine, InteractListener, ModelListener, TooltipInfo};
pub use hover::{DEBOUNCE_INTERVAL, HoverPhase, HoverTracker, TOOLTIP_DELAY, Tooltip};
pub use input::{InputEvent, Modifiers};
pub use keyboard::{Action, Shortcuts, navigate};
pub use related::{kinds_related, related_elements};
pub use timer::Deadline;
