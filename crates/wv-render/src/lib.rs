pub mod edge;
pub mod hit;
pub mod paint;
pub mod style;
pub mod text;
pub mod viewport;

pub use hit::{PickTarget, hit_test, pick};
pub use paint::{RenderState, paint_scene};
pub use style::{EdgeStyle, NodeStyle, edge_style, node_style};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};
