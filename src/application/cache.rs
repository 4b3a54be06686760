//! The process-wide seen-set of warned call sites.
//!
//! Each (entity, call site) fingerprint has two states, UNSEEN → SEEN, and
//! the transition fires exactly once. The cache also holds the rendered
//! message so synthesis runs once per site. Entries are never evicted: call
//! sites are bounded by source code size, not by request volume.

use crate::application::ports::Storage;
use crate::domain::fingerprint::Fingerprint;

/// State tracked per fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteState {
    /// The message for this site, computed once on first claim.
    pub message: String,
    /// Whether the warning has been handed out for emission.
    pub emitted: bool,
}

impl SiteState {
    fn new(message: String) -> Self {
        Self {
            message,
            emitted: false,
        }
    }
}

/// Warn-once cache over a storage port.
///
/// Generic over the storage implementation; in production this is
/// `Arc<ShardedStorage>`, whose entry API makes the lookup-and-mark in
/// [`claim`](Self::claim) a single atomic operation. Two near-simultaneous
/// first calls from the same site therefore cannot both observe UNSEEN.
#[derive(Debug, Clone)]
pub struct CallSiteCache<S>
where
    S: Storage<Fingerprint, SiteState> + Clone,
{
    storage: S,
}

impl<S> CallSiteCache<S>
where
    S: Storage<Fingerprint, SiteState> + Clone,
{
    /// Create a cache over the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Atomically check-and-mark a fingerprint.
    ///
    /// On the first claim of `key`, computes the message via `synth`, stores
    /// it, flips the site to SEEN, and returns `Some(message)` — the caller
    /// must then render and write it. Every later claim returns `None` and
    /// has no side effect.
    pub fn claim(&self, key: Fingerprint, synth: impl FnOnce() -> String) -> Option<String> {
        self.storage
            .with_entry_mut(key, || SiteState::new(synth()), |state| {
                if state.emitted {
                    None
                } else {
                    state.emitted = true;
                    Some(state.message.clone())
                }
            })
    }

    /// The cached message for a fingerprint, if one was ever claimed.
    pub fn message(&self, key: Fingerprint) -> Option<String> {
        let mut found = None;
        self.storage.for_each(|k, state| {
            if *k == key {
                found = Some(state.message.clone());
            }
        });
        found
    }

    /// Number of distinct call sites seen so far.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether no call site has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Forget every seen site. Test isolation only; production code never
    /// prunes the seen-set.
    pub fn reset(&self) {
        self.storage.clear();
    }
}
