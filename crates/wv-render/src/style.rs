//! Closed type→style lookup tables.
//!
//! One record per semantic kind and one per relation, resolved by tag
//! string. Unknown tags fall back to the interface / dependency entries —
//! evolving external schemas may send tags this build has never seen, and
//! those must still render.

use peniko::Color;
use wv_core::wit::{WitKind, WitRelation};

// ─── Node styles ─────────────────────────────────────────────────────────

/// Visual record for one node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub border: Color,
    pub border_width: f64,
    pub corner_radius: f64,
    pub font_size: f32,
    /// Icon glyph drawn in the node header (rendered by the embedding's
    /// font stack).
    pub icon: &'static str,
    pub icon_size: f32,
}

const fn node(
    fill: [u8; 3],
    border: [u8; 3],
    corner_radius: f64,
    font_size: f32,
    icon: &'static str,
    icon_size: f32,
) -> NodeStyle {
    NodeStyle {
        fill: Color::from_rgb8(fill[0], fill[1], fill[2]),
        border: Color::from_rgb8(border[0], border[1], border[2]),
        border_width: 1.5,
        corner_radius,
        font_size,
        icon,
        icon_size,
    }
}

const PACKAGE: NodeStyle = node([45, 52, 70], [120, 144, 220], 10.0, 15.0, "\u{1F4E6}", 18.0);
const WORLD: NodeStyle = node([40, 58, 58], [94, 190, 160], 10.0, 14.0, "\u{1F310}", 17.0);
const INTERFACE: NodeStyle = node([44, 49, 58], [130, 170, 255], 8.0, 13.0, "\u{25C9}", 15.0);
const FUNCTION: NodeStyle = node([50, 47, 62], [198, 146, 233], 6.0, 12.0, "\u{0192}", 13.0);
const RESOURCE: NodeStyle = node([58, 48, 44], [240, 160, 100], 8.0, 13.0, "\u{25A3}", 15.0);
const TYPE_LIKE: NodeStyle = node([48, 52, 48], [150, 200, 130], 6.0, 12.0, "\u{25A4}", 13.0);
const PORT: NodeStyle = node([52, 52, 52], [180, 180, 190], 4.0, 11.0, "\u{2194}", 12.0);
const SCALAR: NodeStyle = node([46, 46, 50], [140, 140, 150], 4.0, 11.0, "\u{25AA}", 11.0);

/// Resolve the style record for a node's type tag.
///
/// Fallback policy: any tag outside the closed set renders as an
/// interface.
pub fn node_style(tag: &str) -> NodeStyle {
    match WitKind::from_tag(tag) {
        Some(WitKind::Package) => PACKAGE,
        Some(WitKind::World) => WORLD,
        Some(WitKind::Interface) | None => INTERFACE,
        Some(WitKind::Function) => FUNCTION,
        Some(WitKind::Resource) => RESOURCE,
        Some(WitKind::Record | WitKind::Variant | WitKind::Enum | WitKind::Flags) => TYPE_LIKE,
        Some(WitKind::Import | WitKind::Export) => PORT,
        Some(
            WitKind::Primitive | WitKind::List | WitKind::Tuple | WitKind::Option | WitKind::Result,
        ) => SCALAR,
    }
}

// ─── Edge styles ─────────────────────────────────────────────────────────

/// Visual record for one relation kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash pattern in world units; empty means solid.
    pub dash: &'static [f64],
    pub arrow_size: f64,
}

const fn edge(color: [u8; 3], width: f64, dash: &'static [f64]) -> EdgeStyle {
    EdgeStyle {
        color: Color::from_rgb8(color[0], color[1], color[2]),
        width,
        dash,
        arrow_size: 9.0,
    }
}

const SOLID: &[f64] = &[];
const DASHED: &[f64] = &[6.0, 4.0];
const DOTTED: &[f64] = &[2.0, 3.0];

const IMPORT_EDGE: EdgeStyle = edge([130, 170, 255], 1.5, DASHED);
const EXPORT_EDGE: EdgeStyle = edge([94, 190, 160], 1.5, DASHED);
const USES_EDGE: EdgeStyle = edge([180, 180, 190], 1.2, DOTTED);
const IMPLEMENTS_EDGE: EdgeStyle = edge([198, 146, 233], 1.5, SOLID);
const CONTAINS_EDGE: EdgeStyle = edge([120, 144, 220], 2.0, SOLID);
const TYPE_REF_EDGE: EdgeStyle = edge([150, 200, 130], 1.2, DOTTED);
const DEPENDENCY_EDGE: EdgeStyle = edge([140, 140, 150], 1.2, SOLID);

/// Resolve the style record for an edge's relation tag.
///
/// Fallback policy: unknown relations render as a dependency.
pub fn edge_style(tag: &str) -> EdgeStyle {
    match WitRelation::from_tag(tag) {
        Some(WitRelation::Import) => IMPORT_EDGE,
        Some(WitRelation::Export) => EXPORT_EDGE,
        Some(WitRelation::Uses) => USES_EDGE,
        Some(WitRelation::Implements) => IMPLEMENTS_EDGE,
        Some(WitRelation::Contains) => CONTAINS_EDGE,
        Some(WitRelation::TypeReference) => TYPE_REF_EDGE,
        Some(WitRelation::Dependency) | None => DEPENDENCY_EDGE,
    }
}

// ─── Overlay colors ──────────────────────────────────────────────────────

/// Hover glow stroke, additive around the base style.
pub const HOVER_GLOW: Color = Color::from_rgba8(130, 170, 255, 160);
/// Related-element dashed outline.
pub const RELATED_OUTLINE: Color = Color::from_rgba8(240, 200, 100, 200);
/// Tooltip / label plate background.
pub const PLATE_BG: Color = Color::from_rgba8(24, 26, 32, 230);
/// Primary text color, handed to the embedding with each glyph run.
pub const TEXT: Color = Color::from_rgb8(220, 223, 228);
