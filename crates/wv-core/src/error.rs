use crate::id::ElementId;
use thiserror::Error;

/// Errors returned by model and adapter operations.
///
/// Structural problems that leave the diagram renderable are reported as
/// [`crate::validate::Diagnostic`]s instead — an error here means the
/// requested operation itself could not be carried out.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("element `{0}` already exists in the diagram")]
    DuplicateId(ElementId),

    #[error("element `{0}` not found")]
    NotFound(ElementId),

    #[error("element `{0}` is not a node")]
    NotANode(ElementId),

    #[error("edge `{id}` references missing endpoint `{endpoint}`")]
    MissingEndpoint { id: ElementId, endpoint: ElementId },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
