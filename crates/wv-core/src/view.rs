//! View configuration shared between the engine and its collaborators.
//!
//! Visibility flags hide or show elements of a semantic kind without
//! removing them from the model; the paint and hit-test passes both
//! consult the same flags so hidden elements are never pickable.

use crate::wit::WitKind;
use serde::{Deserialize, Serialize};

/// Recognized view options, in the collaborator-facing wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    pub show_packages: bool,
    pub show_worlds: bool,
    pub show_interfaces: bool,
    pub show_types: bool,
    pub show_functions: bool,
    pub show_resources: bool,

    /// Initial expansion level applied on load (see `expand::ExpansionSet`).
    pub expand_level: i32,

    pub highlight_imports: bool,
    pub highlight_exports: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_packages: true,
            show_worlds: true,
            show_interfaces: true,
            show_types: true,
            show_functions: true,
            show_resources: true,
            expand_level: 2,
            highlight_imports: false,
            highlight_exports: false,
        }
    }
}

impl ViewConfig {
    /// Whether elements of this semantic kind are currently visible.
    ///
    /// Kinds without a dedicated flag (imports, exports, structural types)
    /// follow the flag of the group they render with.
    pub fn is_visible(&self, kind: WitKind) -> bool {
        match kind {
            WitKind::Package => self.show_packages,
            WitKind::World => self.show_worlds,
            WitKind::Interface => self.show_interfaces,
            WitKind::Function => self.show_functions,
            WitKind::Resource => self.show_resources,
            WitKind::Record
            | WitKind::Variant
            | WitKind::Enum
            | WitKind::Flags
            | WitKind::Primitive
            | WitKind::List
            | WitKind::Tuple
            | WitKind::Option
            | WitKind::Result => self.show_types,
            WitKind::Import | WitKind::Export => true,
        }
    }
}
