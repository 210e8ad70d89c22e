// Editor session: per-editor state holding the frame layout as one named field.

use crate::config::Config;
use crate::frame::{FrameTreeManager, LocalViewState};

/// State for one open editor. Created when the editor opens and dropped when
/// it closes; the frame layout lives and dies with it.
#[derive(Debug)]
pub struct EditorSession {
    path: String,
    frames: FrameTreeManager,
}

impl EditorSession {
    /// Open a session for `path` with a default frame layout.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_frames(path, FrameTreeManager::new())
    }

    /// Open a session whose frame layout follows `config`.
    pub fn from_config(path: impl Into<String>, config: &Config) -> Self {
        Self::with_frames(path, FrameTreeManager::with_options(config.frame_options()))
    }

    pub fn with_frames(path: impl Into<String>, frames: FrameTreeManager) -> Self {
        let path = path.into();
        log::debug!("Opened editor session for {path}");
        Self { path, frames }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn frames(&self) -> &FrameTreeManager {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameTreeManager {
        &mut self.frames
    }

    /// Owned copy of the layout state, for collaborators that diff snapshots.
    pub fn local_view_state(&self) -> LocalViewState {
        self.frames.snapshot()
    }

    /// Swap in another frame layout, returning the previous one.
    pub fn replace_frames(&mut self, frames: FrameTreeManager) -> FrameTreeManager {
        std::mem::replace(&mut self.frames, frames)
    }
}
