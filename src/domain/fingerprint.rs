//! Call-site fingerprints for warn-once deduplication.
//!
//! A fingerprint identifies one (deprecated entity, call site) pair:
//! - same entity invoked twice from one source location → one fingerprint
//! - different entities invoked from the same location → distinct fingerprints
//! - same entity invoked from different locations → distinct fingerprints

use crate::domain::{entity::EntityId, frame::CallFrame};
use ahash::AHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A unique key for one (entity, call site) pair.
///
/// Invocations with identical fingerprints collapse to a single warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Compute the fingerprint for an entity invoked from a frame.
    ///
    /// Hashes the entity id plus the frame's file, line, and column with
    /// ahash. The display name is deliberately excluded: two captures of the
    /// same location must collapse even when symbol resolution differs
    /// between them.
    pub fn new(entity: EntityId, frame: &CallFrame) -> Self {
        let mut hasher = AHasher::default();

        entity.as_u64().hash(&mut hasher);
        frame.file.hash(&mut hasher);
        frame.line.hash(&mut hasher);
        frame.column.hash(&mut hasher);

        Fingerprint(hasher.finish())
    }

    /// Raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
