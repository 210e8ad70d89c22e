use super::FrameId;

/// Errors returned by frame tree operations. A failed operation never
/// modifies the tree or the active id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The id does not name a leaf in the current tree.
    #[error("no frame with id \"{0}\"")]
    NotFound(FrameId),
    /// The id is absent, or names a split node, so it cannot be activated.
    #[error("no leaf with id \"{0}\"")]
    InvalidLeaf(FrameId),
    /// Closing the sole remaining leaf was rejected.
    #[error("cannot close the last frame \"{0}\"")]
    LastFrame(FrameId),
}

impl FrameError {
    /// The id the failed operation was given.
    pub fn id(&self) -> &FrameId {
        match self {
            FrameError::NotFound(id)
            | FrameError::InvalidLeaf(id)
            | FrameError::LastFrame(id) => id,
        }
    }
}
