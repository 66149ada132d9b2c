use indextree::NodeId;

/// One recorded mutation of a [`crate::Document`].
///
/// The journal mirrors the order in which mutations were applied, which
/// lets callers check sequencing (removals before insertions, attribute
/// writes before focus changes, and so on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomUpdate {
    InsertElement {
        parent: NodeId,
        node: NodeId,
        tag: String,
        pos: usize,
    },
    InsertText {
        parent: NodeId,
        node: NodeId,
        text: String,
        pos: usize,
    },
    SetAttr {
        node: NodeId,
        name: String,
        value: String,
    },
    RemoveAttr {
        node: NodeId,
        name: String,
    },
    RemoveNode {
        node: NodeId,
    },
}

impl DomUpdate {
    /// The node the mutation applies to.
    pub const fn node(&self) -> NodeId {
        match self {
            Self::InsertElement { node, .. }
            | Self::InsertText { node, .. }
            | Self::SetAttr { node, .. }
            | Self::RemoveAttr { node, .. }
            | Self::RemoveNode { node } => *node,
        }
    }
}
