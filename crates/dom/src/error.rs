use indextree::NodeId;
use std::io;
use thiserror::Error;

/// Failures raised by [`crate::Document`] operations.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("node {0:?} does not exist in this document")]
    UnknownNode(NodeId),
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    #[error("cannot append {child:?} to {parent:?}")]
    InvalidInsertion { parent: NodeId, child: NodeId },
    #[error("failed to read markup: {0}")]
    Io(#[from] io::Error),
}
