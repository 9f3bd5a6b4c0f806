//! Phase stack types

use super::codec;
use crate::error::Result;
use crate::types::ResourceTypeTag;

/// One pending or in-progress enumeration unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhaseFrame {
    /// Phase identifier
    pub tag: ResourceTypeTag,
    /// Backend cursor, empty at the start of the phase
    pub cursor: String,
}

impl PhaseFrame {
    /// Frame at the start of its phase
    pub fn new(tag: ResourceTypeTag) -> Self {
        Self {
            tag,
            cursor: String::new(),
        }
    }

    /// Frame resumed at `cursor`
    pub fn with_cursor(tag: ResourceTypeTag, cursor: impl Into<String>) -> Self {
        Self {
            tag,
            cursor: cursor.into(),
        }
    }

    /// Whether the phase has not fetched anything yet
    pub fn is_fresh(&self) -> bool {
        self.cursor.is_empty()
    }
}

/// Last-in-first-out stack of phase frames.
///
/// The top frame is the phase executed next; frames below it are either not
/// yet started or paused until everything above them completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseStack {
    /// Bottom first, top last
    frames: Vec<PhaseFrame>,
}

impl PhaseStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack holding a single fresh frame
    pub fn seeded(tag: ResourceTypeTag) -> Self {
        Self {
            frames: vec![PhaseFrame::new(tag)],
        }
    }

    /// Build from frames listed bottom to top
    pub fn from_frames(frames: Vec<PhaseFrame>) -> Self {
        Self { frames }
    }

    /// Rebuild the stack for a call.
    ///
    /// The empty token starts a new traversal at `seed`; anything else must
    /// decode cleanly.
    pub fn resume(token: &str, seed: ResourceTypeTag) -> Result<Self> {
        if token.is_empty() {
            Ok(Self::seeded(seed))
        } else {
            codec::decode_raw(token)
        }
    }

    /// Serialize to a continuation token (empty when the stack is empty)
    pub fn encode(&self) -> String {
        codec::encode(self)
    }

    /// Push a frame on top
    pub fn push(&mut self, frame: PhaseFrame) {
        self.frames.push(frame);
    }

    /// Push a fresh frame for `tag`
    pub fn push_phase(&mut self, tag: ResourceTypeTag) {
        self.push(PhaseFrame::new(tag));
    }

    /// Remove and return the top frame
    pub fn pop(&mut self) -> Option<PhaseFrame> {
        self.frames.pop()
    }

    /// Top frame, without mutating
    pub fn top(&self) -> Option<&PhaseFrame> {
        self.frames.last()
    }

    /// Replace the cursor of the top frame. Returns false on an empty stack.
    pub fn set_cursor(&mut self, cursor: impl Into<String>) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.cursor = cursor.into();
                true
            }
            None => false,
        }
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the traversal is complete
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames, bottom first
    pub fn frames(&self) -> &[PhaseFrame] {
        &self.frames
    }
}
