// Frame layout engine: binary tree of editor frames with one active leaf.

pub mod error;
pub mod id;
pub mod tree;

use serde::{Deserialize, Serialize};

pub use error::FrameError;
pub use id::{FrameId, IdSource, ScriptedIds, SequentialIds};
pub use tree::{FrameTreeManager, FrameTreeOptions, LastFramePolicy, LocalViewState, SplitFocus};

/// Direction of a split in the frame tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Frames stacked top/bottom, divided by a horizontal line.
    Row,
    /// Frames side by side, divided by a vertical line.
    Col,
}

impl SplitDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitDirection::Row => "row",
            SplitDirection::Col => "col",
        }
    }

    /// Parse `"row"` or `"col"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "row" => Some(SplitDirection::Row),
            "col" => Some(SplitDirection::Col),
            _ => None,
        }
    }
}

/// A node in the binary frame tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FrameNode {
    /// One editing surface. `pane_type` says what gets rendered and is never
    /// interpreted here.
    Leaf {
        id: FrameId,
        #[serde(rename = "paneType")]
        pane_type: String,
    },
    /// An internal node dividing its space between two children.
    Split {
        id: FrameId,
        direction: SplitDirection,
        first: Box<FrameNode>,
        second: Box<FrameNode>,
    },
}

impl FrameNode {
    /// Create a new leaf node.
    pub fn leaf(id: FrameId, pane_type: impl Into<String>) -> Self {
        FrameNode::Leaf {
            id,
            pane_type: pane_type.into(),
        }
    }

    /// Create a new split node.
    pub fn split(
        id: FrameId,
        direction: SplitDirection,
        first: FrameNode,
        second: FrameNode,
    ) -> Self {
        FrameNode::Split {
            id,
            direction,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Id of this node, leaf or split.
    pub fn id(&self) -> &FrameId {
        match self {
            FrameNode::Leaf { id, .. } | FrameNode::Split { id, .. } => id,
        }
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, FrameNode::Leaf { .. })
    }

    /// Pane type if this is a leaf node.
    pub fn pane_type(&self) -> Option<&str> {
        match self {
            FrameNode::Leaf { pane_type, .. } => Some(pane_type),
            FrameNode::Split { .. } => None,
        }
    }

    /// Count the number of leaf nodes in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            FrameNode::Leaf { .. } => 1,
            FrameNode::Split { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Count the number of split nodes in this subtree.
    pub fn split_count(&self) -> usize {
        match self {
            FrameNode::Leaf { .. } => 0,
            FrameNode::Split { first, second, .. } => {
                1 + first.split_count() + second.split_count()
            }
        }
    }

    /// Collect all leaf ids in this subtree, `first` before `second`.
    pub fn leaf_ids(&self) -> Vec<FrameId> {
        let mut ids = Vec::with_capacity(self.leaf_count());
        self.collect_leaf_ids(&mut ids);
        ids
    }

    fn collect_leaf_ids(&self, out: &mut Vec<FrameId>) {
        match self {
            FrameNode::Leaf { id, .. } => out.push(id.clone()),
            FrameNode::Split { first, second, .. } => {
                first.collect_leaf_ids(out);
                second.collect_leaf_ids(out);
            }
        }
    }

    /// Leaf reached by always following `first` from this node.
    pub fn first_leaf(&self) -> &FrameId {
        let mut node = self;
        loop {
            match node {
                FrameNode::Leaf { id, .. } => return id,
                FrameNode::Split { first, .. } => node = first.as_ref(),
            }
        }
    }

    /// Find the node (leaf or split) with the given id.
    pub fn find(&self, target: &FrameId) -> Option<&FrameNode> {
        if self.id() == target {
            return Some(self);
        }
        match self {
            FrameNode::Leaf { .. } => None,
            FrameNode::Split { first, second, .. } => {
                first.find(target).or_else(|| second.find(target))
            }
        }
    }

    pub(crate) fn find_mut(&mut self, target: &FrameId) -> Option<&mut FrameNode> {
        if self.id() == target {
            return Some(self);
        }
        match self {
            FrameNode::Leaf { .. } => None,
            FrameNode::Split { first, second, .. } => {
                if let Some(node) = first.find_mut(target) {
                    return Some(node);
                }
                second.find_mut(target)
            }
        }
    }

    /// Whether any node in this subtree has the given id.
    pub fn contains(&self, target: &FrameId) -> bool {
        self.find(target).is_some()
    }

    /// Whether the given id names a leaf in this subtree.
    pub fn contains_leaf(&self, target: &FrameId) -> bool {
        self.find(target).is_some_and(FrameNode::is_leaf)
    }

    /// Replace this leaf with a split holding the original leaf first and a
    /// new leaf of the same pane type second. Returns false on split nodes.
    pub(crate) fn split_in_place(
        &mut self,
        direction: SplitDirection,
        split_id: FrameId,
        new_id: FrameId,
    ) -> bool {
        let FrameNode::Leaf { id, pane_type } = self else {
            return false;
        };
        let original = FrameNode::leaf(id.clone(), pane_type.clone());
        let sibling = FrameNode::leaf(new_id, pane_type.clone());
        *self = FrameNode::split(split_id, direction, original, sibling);
        true
    }

    /// Remove the leaf with the given id, collapsing its parent split into
    /// the sibling subtree.
    pub(crate) fn remove_leaf(&mut self, target: &FrameId) -> RemoveResult {
        match self {
            FrameNode::Leaf { id, .. } if id == target => RemoveResult::RemovedSelf,
            FrameNode::Leaf { .. } => RemoveResult::NotFound,
            FrameNode::Split { first, second, .. } => {
                let survivor = match first.remove_leaf(target) {
                    // First child was the target; second takes the parent's place
                    RemoveResult::RemovedSelf => second,
                    RemoveResult::NotFound => match second.remove_leaf(target) {
                        RemoveResult::RemovedSelf => first,
                        other => return other,
                    },
                    removed => return removed,
                };
                let survivor = std::mem::replace(survivor.as_mut(), FrameNode::vacant());
                let promoted = survivor.first_leaf().clone();
                *self = survivor;
                RemoveResult::Removed { promoted }
            }
        }
    }

    /// Short-lived stand-in used while moving a subtree out of its parent.
    fn vacant() -> Self {
        FrameNode::leaf(FrameId::new(String::new()), String::new())
    }
}

/// Result of a remove_leaf operation.
#[derive(Debug, PartialEq)]
pub(crate) enum RemoveResult {
    /// The node itself was the target and should be replaced by its parent.
    RemovedSelf,
    /// The target was removed within this subtree. `promoted` is the
    /// first-child descent leaf of the sibling that took the parent's place.
    Removed { promoted: FrameId },
    /// The target was not found in this subtree.
    NotFound,
}
