pub mod adapter;
pub mod error;
pub mod expand;
pub mod hierarchy;
pub mod id;
pub mod model;
pub mod validate;
pub mod view;
pub mod wit;

pub use adapter::{DIAGRAM_TYPE, connection_to_edge, element_to_node, to_diagram, to_semantic};
pub use error::CoreError;
pub use expand::{ExpansionSet, reveal_depth};
pub use hierarchy::Hierarchy;
pub use id::ElementId;
pub use model::{Bounds, DiagramModel, Edge, Element, Node, Point, Properties, Size};
pub use validate::{Diagnostic, Severity, validate};
pub use view::ViewConfig;
pub use wit::{
    NamedType, WitConnection, WitDetails, WitElement, WitGraph, WitKind, WitRelation,
};
