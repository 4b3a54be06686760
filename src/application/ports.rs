//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports: the stack-trace
//! provider, the diagnostic sink, the wall clock, and the seen-set storage.

use crate::domain::frame::CallFrame;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::hash::Hash;
use std::io;

/// Port for capturing the current call stack.
///
/// Produces an ordered sequence of frames for the current execution point,
/// outermost call last. The top `skip` frames are discarded before
/// collection so the deprecation machinery's own frames never reach the
/// caller-frame selection.
///
/// Implementations must not fail: an empty vector is the degraded result
/// when stack information is unavailable.
pub trait StackProvider: Send + Sync + Debug {
    /// Capture frames above the current point, discarding the top `skip`.
    fn capture_frames(&self, skip: usize) -> Vec<CallFrame>;
}

/// Port for the diagnostic output destination.
///
/// The color capability is an explicit query the sink answers, not an
/// inspection of a global stream. The core queries it once per emission and
/// writes exactly one chunk per emission.
pub trait DiagnosticSink: Send + Sync + Debug {
    /// Whether the destination is an interactive, color-capable terminal.
    fn color_capable(&self) -> bool;

    /// Write one formatted chunk.
    ///
    /// The chunk is a complete, newline-terminated warning (possibly
    /// multi-line); writing it in one call keeps concurrent writers from
    /// interleaving. Failure policy belongs to the adapter: the core never
    /// retries and never masks a panicking sink.
    fn write_chunk(&self, chunk: &str) -> io::Result<()>;
}

/// Port for obtaining wall-clock time.
///
/// Timestamps appear only in plain-mode output, so this is wall time rather
/// than a monotonic instant. Infrastructure provides concrete
/// implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current UTC time.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Port for concurrent key-value storage backing the seen-set.
///
/// This abstraction allows the application layer to store and retrieve
/// values without depending on specific concurrent data structure
/// implementations. The entry access in `with_entry_mut` must be a single
/// atomic operation: two near-simultaneous first claims of one key must not
/// both observe "absent".
pub trait Storage<K, V>: Send + Sync + Debug
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Access an entry with mutable access, creating it if necessary.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    /// * `factory` - Function to create a new value if the key doesn't exist
    /// * `accessor` - Function that gets mutable access to the value
    ///
    /// # Returns
    /// The result from the accessor function
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R;

    /// Get the number of entries in the storage.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Clear all entries from the storage.
    fn clear(&self);

    /// Iterate over all entries, providing access to both key and value.
    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V);
}
