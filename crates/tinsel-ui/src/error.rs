use crate::tree::NodeId;

/// Errors returned by widget tree mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The handle refers to a widget that was removed (or never existed).
    StaleHandle(NodeId),

    /// The root node cannot be removed or reparented.
    RootRemoval,

    /// Moving `node` under `parent` would make it its own ancestor.
    CyclicReparent { node: NodeId, parent: NodeId },

    /// The widget exists but its behavior is not the requested type.
    BehaviorMismatch {
        node: NodeId,
        expected: &'static str,
    },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::StaleHandle(id) => write!(f, "Widget handle {:?} is no longer valid", id),
            TreeError::RootRemoval => write!(f, "The root widget cannot be removed or moved"),
            TreeError::CyclicReparent { node, parent } => write!(
                f,
                "Cannot move widget {:?} under its own descendant {:?}",
                node, parent
            ),
            TreeError::BehaviorMismatch { node, expected } => {
                write!(f, "Widget {:?} is not a {}", node, expected)
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for widget tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
