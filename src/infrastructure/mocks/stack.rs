//! Mock stack provider for testing.

use crate::application::ports::StackProvider;
use crate::domain::frame::CallFrame;
use std::sync::{Arc, Mutex};

/// Mock stack provider returning scripted frames.
///
/// The scripted frames stand for the stack *after* the machinery's own
/// frames have been discarded, so the skip argument is ignored; this keeps
/// call-site assertions deterministic regardless of inlining.
///
/// # Examples
///
/// ```
/// use depwarn::infrastructure::mocks::MockStackProvider;
/// use depwarn::application::ports::StackProvider;
/// use depwarn::CallFrame;
///
/// let provider = MockStackProvider::returning(vec![
///     CallFrame::new("caller.rs", 10, 9).with_display_name("callold"),
/// ]);
///
/// let frames = provider.capture_frames(3);
/// assert_eq!(frames[0].line, 10);
/// ```
#[derive(Debug, Clone)]
pub struct MockStackProvider {
    frames: Arc<Mutex<Vec<CallFrame>>>,
}

impl MockStackProvider {
    /// Create a provider that yields the given frames on every capture.
    pub fn returning(frames: Vec<CallFrame>) -> Self {
        Self {
            frames: Arc::new(Mutex::new(frames)),
        }
    }

    /// Replace the scripted frames, simulating a different call site.
    pub fn set_frames(&self, frames: Vec<CallFrame>) {
        *self.frames.lock().expect(
            "MockStackProvider mutex poisoned - a test thread panicked while holding the lock",
        ) = frames;
    }
}

impl StackProvider for MockStackProvider {
    fn capture_frames(&self, _skip: usize) -> Vec<CallFrame> {
        self.frames
            .lock()
            .expect(
                "MockStackProvider mutex poisoned - a test thread panicked while holding the lock",
            )
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_scripted_frames() {
        let provider =
            MockStackProvider::returning(vec![CallFrame::new("a.rs", 1, 2), CallFrame::new("b.rs", 3, 4)]);

        let frames = provider.capture_frames(0);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].file, "b.rs");
    }

    #[test]
    fn test_set_frames_replaces_script() {
        let provider = MockStackProvider::returning(vec![CallFrame::new("a.rs", 1, 2)]);
        provider.set_frames(vec![CallFrame::new("c.rs", 9, 9)]);

        assert_eq!(provider.capture_frames(0)[0].file, "c.rs");
    }

    #[test]
    fn test_clones_share_script() {
        let provider = MockStackProvider::returning(vec![CallFrame::new("a.rs", 1, 2)]);
        let clone = provider.clone();
        clone.set_frames(vec![]);

        assert!(provider.capture_frames(0).is_empty());
    }
}
