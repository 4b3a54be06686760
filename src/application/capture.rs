//! Caller-frame selection over a stack provider.
//!
//! The emitter needs the frame of the *caller* of the deprecated entity, not
//! any frame of this crate's own machinery. `FrameCapture` applies the skip
//! count, filters out machinery frames by symbol prefix, and degrades to
//! [`CallFrame::unknown`] instead of failing so a warning is still delivered
//! when stack information is unavailable.

use crate::application::ports::StackProvider;
use crate::domain::frame::CallFrame;
use std::sync::Arc;

/// Symbol prefix identifying this crate's own frames.
const MACHINERY_PREFIX: &str = "depwarn::";

/// Selects the caller frame from captured stacks.
#[derive(Debug, Clone)]
pub struct FrameCapture {
    provider: Arc<dyn StackProvider>,
}

impl FrameCapture {
    /// Create a capture helper over a stack provider.
    pub fn new(provider: Arc<dyn StackProvider>) -> Self {
        Self { provider }
    }

    /// The frame of the first user-code caller above `skip` internal frames.
    ///
    /// Frames whose resolved symbol name starts with this crate's module
    /// prefix are machinery regardless of the skip count (inlining can fold
    /// internal frames unpredictably) and are passed over. Never fails: an
    /// empty or fully-internal capture yields [`CallFrame::unknown`].
    pub fn caller_frame(&self, skip: usize) -> CallFrame {
        let frames = self.provider.capture_frames(skip);

        frames
            .iter()
            .find(|frame| !is_machinery(frame))
            .or_else(|| frames.first())
            .cloned()
            .unwrap_or_else(CallFrame::unknown)
    }

    /// The full user-visible stack above `skip` internal frames.
    ///
    /// Used for traced emission; machinery frames are dropped from the top
    /// but deeper frames are kept as captured.
    pub fn user_frames(&self, skip: usize) -> Vec<CallFrame> {
        let mut frames = self.provider.capture_frames(skip);
        while frames.first().is_some_and(is_machinery) {
            frames.remove(0);
        }
        frames
    }

    /// Access to the underlying provider.
    pub fn provider(&self) -> &Arc<dyn StackProvider> {
        &self.provider
    }
}

fn is_machinery(frame: &CallFrame) -> bool {
    frame
        .display_name
        .as_deref()
        .is_some_and(|name| name.starts_with(MACHINERY_PREFIX))
}
