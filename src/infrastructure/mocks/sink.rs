//! Mock diagnostic sink for testing.

use crate::application::ports::DiagnosticSink;
use std::io;
use std::sync::{Arc, Mutex};

/// Mock sink that captures written chunks for testing.
///
/// The color-capability flag is set explicitly, mirroring how the original
/// system's tests force the stream's TTY flag on and off, and can be
/// flipped mid-test.
///
/// # Examples
///
/// ```
/// use depwarn::infrastructure::mocks::MockSink;
/// use depwarn::application::ports::DiagnosticSink;
///
/// let sink = MockSink::plain();
/// sink.write_chunk("ns deprecated msg at a.rs:1:1\n").unwrap();
///
/// assert_eq!(sink.count(), 1);
/// assert!(sink.output().contains("deprecated"));
/// ```
#[derive(Debug, Clone)]
pub struct MockSink {
    chunks: Arc<Mutex<Vec<String>>>,
    color: Arc<Mutex<bool>>,
    fail_writes: bool,
}

impl MockSink {
    /// A sink reporting no color capability.
    pub fn plain() -> Self {
        Self {
            chunks: Arc::new(Mutex::new(Vec::new())),
            color: Arc::new(Mutex::new(false)),
            fail_writes: false,
        }
    }

    /// A sink reporting color capability.
    pub fn colored() -> Self {
        let sink = Self::plain();
        sink.set_color_capable(true);
        sink
    }

    /// A sink whose writes always fail with `BrokenPipe`.
    pub fn failing() -> Self {
        Self {
            chunks: Arc::new(Mutex::new(Vec::new())),
            color: Arc::new(Mutex::new(false)),
            fail_writes: true,
        }
    }

    /// Flip the reported color capability.
    pub fn set_color_capable(&self, color: bool) {
        *self
            .color
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock") =
            color;
    }

    /// All captured chunks, in write order.
    pub fn chunks(&self) -> Vec<String> {
        self.chunks
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Captured output concatenated.
    pub fn output(&self) -> String {
        self.chunks().concat()
    }

    /// Number of chunks written.
    pub fn count(&self) -> usize {
        self.chunks
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .len()
    }

    /// The one chunk written so far; panics unless exactly one exists.
    pub fn single_chunk(&self) -> String {
        let chunks = self.chunks();
        assert_eq!(chunks.len(), 1, "expected exactly one chunk, got {:?}", chunks);
        chunks.into_iter().next().unwrap()
    }

    /// Clear all captured chunks.
    pub fn clear(&self) {
        self.chunks
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .clear();
    }
}

impl DiagnosticSink for MockSink {
    fn color_capable(&self) -> bool {
        *self
            .color
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
    }

    fn write_chunk(&self, chunk: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock sink failure"));
        }
        self.chunks
            .lock()
            .expect("MockSink mutex poisoned - a test thread panicked while holding the lock")
            .push(chunk.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_chunks_in_order() {
        let sink = MockSink::plain();
        sink.write_chunk("first\n").unwrap();
        sink.write_chunk("second\n").unwrap();

        assert_eq!(sink.chunks(), vec!["first\n", "second\n"]);
        assert_eq!(sink.output(), "first\nsecond\n");
    }

    #[test]
    fn test_color_flag_flips() {
        let sink = MockSink::plain();
        assert!(!sink.color_capable());

        sink.set_color_capable(true);
        assert!(sink.color_capable());
    }

    #[test]
    fn test_failing_sink_returns_error() {
        let sink = MockSink::failing();
        let err = sink.write_chunk("chunk\n").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_clear() {
        let sink = MockSink::plain();
        sink.write_chunk("chunk\n").unwrap();
        sink.clear();

        assert_eq!(sink.count(), 0);
    }
}
