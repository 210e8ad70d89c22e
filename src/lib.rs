// frametree: split-frame layout manager for editor panes.

pub mod command;
pub mod config;
pub mod frame;
pub mod session;

pub use frame::{
    FrameError, FrameId, FrameNode, FrameTreeManager, FrameTreeOptions, LocalViewState,
    SplitDirection,
};
pub use session::EditorSession;
