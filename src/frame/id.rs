// Frame id generation.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Global monotonically increasing frame id counter.
static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a frame node (leaf or split).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FrameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of fresh frame ids.
///
/// The tree only relies on ids being distinct from every id currently in
/// use; how they are minted is up to the implementation.
pub trait IdSource: fmt::Debug + Send {
    fn next_id(&mut self) -> FrameId;
}

/// Process-wide counter ids (`frame-1`, `frame-2`, ...). Never reused.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds;

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> FrameId {
        let n = NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed);
        FrameId(format!("frame-{n}"))
    }
}

/// Hands out a fixed list of ids in order, then falls back to [`SequentialIds`].
///
/// Useful for replaying a recorded layout or for tests that want to name
/// their frames.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIds {
    queue: VecDeque<FrameId>,
}

impl ScriptedIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: ids.into_iter().map(|s| FrameId(s.into())).collect(),
        }
    }

    /// Number of scripted ids not yet handed out.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl IdSource for ScriptedIds {
    fn next_id(&mut self) -> FrameId {
        self.queue
            .pop_front()
            .unwrap_or_else(|| SequentialIds.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_are_unique() {
        let mut source = SequentialIds;
        let ids: HashSet<FrameId> = (0..100).map(|_| source.next_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn sequential_ids_use_frame_prefix() {
        let id = SequentialIds.next_id();
        assert!(id.as_str().starts_with("frame-"), "unexpected id {id}");
    }

    #[test]
    fn scripted_ids_come_out_in_order() {
        let mut source = ScriptedIds::new(["a", "b"]);
        assert_eq!(source.next_id(), FrameId::from("a"));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_id(), FrameId::from("b"));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn scripted_ids_fall_back_to_sequential() {
        let mut source = ScriptedIds::new(["only"]);
        source.next_id();
        assert!(source.next_id().as_str().starts_with("frame-"));
    }

    #[test]
    fn frame_id_display_is_raw_string() {
        assert_eq!(format!("{}", FrameId::from("L0")), "L0");
    }

    #[test]
    fn frame_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&FrameId::from("L0")).unwrap();
        assert_eq!(json, "\"L0\"");
    }
}
