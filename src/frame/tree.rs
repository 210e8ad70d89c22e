// Frame tree manager: owns the tree, the active leaf, and the full-frame state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    FrameError, FrameId, FrameNode, IdSource, RemoveResult, SequentialIds, SplitDirection,
};

/// Which frame becomes active after a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitFocus {
    /// The new frame is activated only when the split target was active.
    #[default]
    IfTargetActive,
    /// The new frame is always activated.
    Always,
}

/// What `close_frame` does with the sole remaining leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastFramePolicy {
    /// Fail with [`FrameError::LastFrame`].
    #[default]
    Reject,
    /// Leave the tree as it is and report success.
    Ignore,
}

/// Behavior knobs for a [`FrameTreeManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTreeOptions {
    /// Pane type of the root leaf created on construction and reset.
    pub default_pane_type: String,
    pub split_focus: SplitFocus,
    pub last_frame: LastFramePolicy,
}

impl Default for FrameTreeOptions {
    fn default() -> Self {
        Self {
            default_pane_type: "cm".to_string(),
            split_focus: SplitFocus::default(),
            last_frame: LastFramePolicy::default(),
        }
    }
}

/// The per-editor layout state read by rendering collaborators.
///
/// `active_id` always names a leaf of `frame_tree`. `full_id`, when set,
/// names the active leaf, which is then shown alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalViewState {
    pub frame_tree: FrameNode,
    pub active_id: FrameId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_id: Option<FrameId>,
}

impl LocalViewState {
    fn single(id: FrameId, pane_type: &str) -> Self {
        Self {
            frame_tree: FrameNode::leaf(id.clone(), pane_type),
            active_id: id,
            full_id: None,
        }
    }
}

/// Owns a frame tree and keeps the active id pointing at a leaf across
/// every mutation. Each operation either commits completely or returns an
/// error with the state untouched.
///
/// Every id the manager has ever handed out stays retired for its whole
/// lifetime, across closes and resets.
#[derive(Debug)]
pub struct FrameTreeManager {
    state: LocalViewState,
    options: FrameTreeOptions,
    ids: Box<dyn IdSource>,
    issued: HashSet<FrameId>,
}

impl Default for FrameTreeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTreeManager {
    /// Create a manager with a single root leaf and default options.
    pub fn new() -> Self {
        Self::with_options(FrameTreeOptions::default())
    }

    pub fn with_options(options: FrameTreeOptions) -> Self {
        Self::with_id_source(options, Box::new(SequentialIds))
    }

    /// Create a manager drawing its ids from `ids`. The first id becomes the
    /// root leaf.
    pub fn with_id_source(options: FrameTreeOptions, mut ids: Box<dyn IdSource>) -> Self {
        let root = ids.next_id();
        let issued = HashSet::from([root.clone()]);
        let state = LocalViewState::single(root, &options.default_pane_type);
        Self {
            state,
            options,
            ids,
            issued,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Root of the current tree.
    pub fn tree(&self) -> &FrameNode {
        &self.state.frame_tree
    }

    /// Owned copy of the whole view state.
    pub fn snapshot(&self) -> LocalViewState {
        self.state.clone()
    }

    pub fn view_state(&self) -> &LocalViewState {
        &self.state
    }

    pub fn options(&self) -> &FrameTreeOptions {
        &self.options
    }

    pub fn active_id(&self) -> &FrameId {
        &self.state.active_id
    }

    /// The maximized leaf, if any.
    pub fn full_id(&self) -> Option<&FrameId> {
        self.state.full_id.as_ref()
    }

    /// Leaf ids in depth-first order, `first` before `second`.
    pub fn leaf_ids(&self) -> Vec<FrameId> {
        self.state.frame_tree.leaf_ids()
    }

    /// Leaves to draw: only the full frame when one is set, otherwise all.
    pub fn visible_leaves(&self) -> Vec<FrameId> {
        match &self.state.full_id {
            Some(id) => vec![id.clone()],
            None => self.leaf_ids(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.state.frame_tree.leaf_count()
    }

    pub fn find(&self, id: &FrameId) -> Option<&FrameNode> {
        self.state.frame_tree.find(id)
    }

    /// Whether `id` names any node, leaf or split.
    pub fn contains(&self, id: &FrameId) -> bool {
        self.state.frame_tree.contains(id)
    }

    pub fn is_leaf(&self, id: &FrameId) -> bool {
        self.state.frame_tree.contains_leaf(id)
    }

    pub fn pane_type(&self, id: &FrameId) -> Option<&str> {
        self.find(id).and_then(FrameNode::pane_type)
    }

    // ── Structural operations ────────────────────────────────────────

    /// Split `target` (or the active leaf) in `direction`. The target keeps
    /// its id as the first child; a new leaf of the same pane type becomes
    /// the second child. Returns the new leaf's id.
    pub fn split_frame(
        &mut self,
        direction: SplitDirection,
        target: Option<&FrameId>,
    ) -> Result<FrameId, FrameError> {
        let target = target.unwrap_or(&self.state.active_id).clone();
        if !self.is_leaf(&target) {
            return Err(FrameError::NotFound(target));
        }

        let new_id = self.fresh_id();
        let split_id = self.fresh_id();
        let split = self
            .state
            .frame_tree
            .find_mut(&target)
            .is_some_and(|node| node.split_in_place(direction, split_id, new_id.clone()));
        if !split {
            return Err(FrameError::NotFound(target));
        }

        self.state.full_id = None;
        let target_was_active = target == self.state.active_id;
        if target_was_active || self.options.split_focus == SplitFocus::Always {
            self.state.active_id = new_id.clone();
        }
        log::debug!(
            "Split frame {target} ({}), new frame {new_id}, active {}",
            direction.as_str(),
            self.state.active_id
        );
        Ok(new_id)
    }

    /// Remove leaf `id` and let its sibling subtree take the parent's place.
    /// Returns the active id after the close.
    ///
    /// Closing the active leaf activates the first-child descent leaf of the
    /// promoted sibling.
    pub fn close_frame(&mut self, id: &FrameId) -> Result<FrameId, FrameError> {
        if !self.is_leaf(id) {
            return Err(FrameError::NotFound(id.clone()));
        }

        if self.state.frame_tree.is_leaf() {
            return match self.options.last_frame {
                LastFramePolicy::Reject => Err(FrameError::LastFrame(id.clone())),
                LastFramePolicy::Ignore => {
                    log::debug!("Ignoring close of last frame {id}");
                    Ok(self.state.active_id.clone())
                }
            };
        }

        match self.state.frame_tree.remove_leaf(id) {
            RemoveResult::Removed { promoted } => {
                self.state.full_id = None;
                if self.state.active_id == *id {
                    self.state.active_id = promoted;
                }
                log::debug!("Closed frame {id}, active {}", self.state.active_id);
                Ok(self.state.active_id.clone())
            }
            RemoveResult::RemovedSelf | RemoveResult::NotFound => {
                Err(FrameError::NotFound(id.clone()))
            }
        }
    }

    /// Make leaf `id` the active frame. Split ids and unknown ids are rejected.
    pub fn set_active_id(&mut self, id: &FrameId) -> Result<(), FrameError> {
        if !self.is_leaf(id) {
            return Err(FrameError::InvalidLeaf(id.clone()));
        }
        self.activate(id.clone());
        Ok(())
    }

    /// Discard the whole tree and start over with a single fresh leaf.
    /// Returns the new root id.
    pub fn reset_frame_tree(&mut self) -> FrameId {
        let root = self.fresh_id();
        self.state = LocalViewState::single(root.clone(), &self.options.default_pane_type);
        log::debug!("Reset frame tree, root {root}");
        root
    }

    // ── Focus and display ────────────────────────────────────────────

    /// Activate the next leaf in `leaf_ids()` order, wrapping around.
    pub fn activate_next(&mut self) -> FrameId {
        self.cycle_active(true)
    }

    /// Activate the previous leaf in `leaf_ids()` order, wrapping around.
    pub fn activate_previous(&mut self) -> FrameId {
        self.cycle_active(false)
    }

    fn cycle_active(&mut self, forward: bool) -> FrameId {
        let ids = self.leaf_ids();
        let pos = ids
            .iter()
            .position(|id| *id == self.state.active_id)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % ids.len()
        } else if pos == 0 {
            ids.len() - 1
        } else {
            pos - 1
        };
        let next_id = ids[next].clone();
        self.activate(next_id.clone());
        next_id
    }

    /// Maximize leaf `id` (and activate it), or restore the full layout with `None`.
    pub fn set_frame_full(&mut self, id: Option<&FrameId>) -> Result<(), FrameError> {
        match id {
            Some(id) => {
                if !self.is_leaf(id) {
                    return Err(FrameError::InvalidLeaf(id.clone()));
                }
                self.state.active_id = id.clone();
                self.state.full_id = Some(id.clone());
                log::debug!("Frame {id} shown full");
            }
            None => {
                self.state.full_id = None;
            }
        }
        Ok(())
    }

    /// Change what leaf `id` renders. Later splits of it copy the new type.
    pub fn set_frame_type(
        &mut self,
        id: &FrameId,
        pane_type: impl Into<String>,
    ) -> Result<(), FrameError> {
        match self.state.frame_tree.find_mut(id) {
            Some(FrameNode::Leaf { pane_type: current, .. }) => {
                *current = pane_type.into();
                log::debug!("Frame {id} now renders {current}");
                Ok(())
            }
            _ => Err(FrameError::NotFound(id.clone())),
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn activate(&mut self, id: FrameId) {
        if self.state.full_id.as_ref().is_some_and(|full| *full != id) {
            self.state.full_id = None;
        }
        log::debug!("Active frame {} -> {id}", self.state.active_id);
        self.state.active_id = id;
    }

    /// Draw an id this manager has never issued and retire it.
    fn fresh_id(&mut self) -> FrameId {
        let mut id = self.ids.next_id();
        if self.issued.contains(&id) {
            log::warn!("Id source repeated frame id {id}, falling back to sequential ids");
            while self.issued.contains(&id) {
                id = SequentialIds.next_id();
            }
        }
        self.issued.insert(id.clone());
        id
    }
}
