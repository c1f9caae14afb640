//! The tag stack
//!
//!     One [Frame] per element or fragment whose start tag has completed and whose end has
//!     not been seen yet. The stack belongs to a single scan; it starts empty and, for a
//!     successful scan, ends empty.
//!
//!     End-tag lookup walks down from the top but never past a fragment frame: a fragment
//!     has no name to auto-close on, so it acts as a barrier for recovery.

use super::tags::{self, TagFamily};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Element { family: TagFamily },
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Tag name as written; empty for fragments
    pub name: String,
    pub kind: FrameKind,
    /// Body is raw text (script, style)
    pub raw: bool,
    /// Byte offset of the `<` that opened it
    pub offset: usize,
}

impl Frame {
    pub fn element(name: impl Into<String>, family: TagFamily, raw: bool, offset: usize) -> Self {
        Self {
            name: name.into(),
            kind: FrameKind::Element { family },
            raw,
            offset,
        }
    }

    pub fn fragment(offset: usize) -> Self {
        Self {
            name: String::new(),
            kind: FrameKind::Fragment,
            raw: false,
            offset,
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, FrameKind::Fragment)
    }

    /// Whether an end tag written `name` closes this frame
    pub fn matches(&self, name: &str) -> bool {
        match self.kind {
            FrameKind::Element { family } => tags::names_match(family, &self.name, name),
            FrameKind::Fragment => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagStack {
    frames: Vec<Frame>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        trace!(name = %frame.name, depth = self.frames.len() + 1, "push frame");
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            trace!(name = %frame.name, depth = self.frames.len(), "pop frame");
        }
        frame
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame an end tag written `name` closes, searching down to the nearest
    /// fragment
    pub fn find_match(&self, name: &str) -> Option<usize> {
        for (idx, frame) in self.frames.iter().enumerate().rev() {
            if frame.is_fragment() {
                return None;
            }
            if frame.matches(name) {
                return Some(idx);
            }
        }
        None
    }

    /// Index of the innermost fragment frame
    pub fn nearest_fragment(&self) -> Option<usize> {
        self.frames.iter().rposition(Frame::is_fragment)
    }

    /// Pop every frame above `idx`, returning them innermost first
    pub fn pop_above(&mut self, idx: usize) -> Vec<Frame> {
        let mut popped = Vec::new();
        while self.frames.len() > idx + 1 {
            if let Some(frame) = self.pop() {
                popped.push(frame);
            }
        }
        popped
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}
