//! Descriptors for deprecated entities.
//!
//! An [`EntityDescriptor`] records *what* was deprecated, captured once at
//! mark-deprecated time: the declared name, the optional enclosing-object
//! label, the declared arity, and where the function was defined. Warn-time
//! code never reflects over live values; everything the message synthesizer
//! needs is in the descriptor.

use crate::domain::frame::SourceSite;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a deprecated entity.
///
/// Two invocations share a fingerprint only when they deprecate the same
/// entity, so the id participates in the dedup key. Ids are never reused
/// within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Allocate the next unused id.
    pub fn next() -> Self {
        EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value, used when hashing fingerprints.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// What kind of code path was deprecated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A bare warning call with no associated function.
    ///
    /// The label, when present, is the object/property path written at the
    /// deprecation-declaration site and is used verbatim by synthesis.
    Bare { label: Option<String> },
    /// A wrapped function.
    Function {
        /// Declared function name, `None` for anonymous functions.
        name: Option<String>,
        /// Enclosing object or type label for method-style access.
        owner: Option<String>,
        /// Declared argument count of the wrapped function.
        arity: usize,
        /// Where the function was defined, for the anonymous-message tag.
        definition_site: Option<SourceSite>,
    },
}

/// A deprecated entity: identity plus mark-time metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    id: EntityId,
    kind: EntityKind,
}

impl EntityDescriptor {
    /// Descriptor for a bare warning call without a label.
    pub fn bare() -> Self {
        Self {
            id: EntityId::next(),
            kind: EntityKind::Bare { label: None },
        }
    }

    /// Descriptor for a bare warning call carrying a declaration-site label.
    pub fn bare_labeled(label: impl Into<String>) -> Self {
        Self {
            id: EntityId::next(),
            kind: EntityKind::Bare {
                label: Some(label.into()),
            },
        }
    }

    /// Descriptor for a named function.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::next(),
            kind: EntityKind::Function {
                name: Some(name.into()),
                owner: None,
                arity: 0,
                definition_site: None,
            },
        }
    }

    /// Descriptor for an anonymous function.
    pub fn anonymous() -> Self {
        Self {
            id: EntityId::next(),
            kind: EntityKind::Function {
                name: None,
                owner: None,
                arity: 0,
                definition_site: None,
            },
        }
    }

    /// Set the enclosing-object label (method-style access).
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        if let EntityKind::Function { owner: o, .. } = &mut self.kind {
            *o = Some(owner.into());
        }
        self
    }

    /// Record the declared argument count.
    pub fn with_arity(mut self, arity: usize) -> Self {
        if let EntityKind::Function { arity: a, .. } = &mut self.kind {
            *a = arity;
        }
        self
    }

    /// Record where the function was defined.
    pub fn with_definition_site(mut self, site: SourceSite) -> Self {
        if let EntityKind::Function {
            definition_site, ..
        } = &mut self.kind
        {
            *definition_site = Some(site);
        }
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Declared arity; 0 for bare entities.
    pub fn arity(&self) -> usize {
        match &self.kind {
            EntityKind::Bare { .. } => 0,
            EntityKind::Function { arity, .. } => *arity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique() {
        let a = EntityDescriptor::named("a");
        let b = EntityDescriptor::named("a");

        // Same metadata, distinct identity.
        assert_ne!(a.id(), b.id());
        assert_eq!(a.kind(), b.kind());
    }

    #[test]
    fn test_named_with_owner_and_arity() {
        let entity = EntityDescriptor::named("oldfn").with_owner("MyLib").with_arity(2);

        assert_eq!(entity.arity(), 2);
        match entity.kind() {
            EntityKind::Function { name, owner, .. } => {
                assert_eq!(name.as_deref(), Some("oldfn"));
                assert_eq!(owner.as_deref(), Some("MyLib"));
            }
            _ => panic!("expected function kind"),
        }
    }

    #[test]
    fn test_anonymous_with_definition_site() {
        let entity =
            EntityDescriptor::anonymous().with_definition_site(SourceSite::new("my-lib.rs", 7, 30));

        match entity.kind() {
            EntityKind::Function {
                name,
                definition_site,
                ..
            } => {
                assert!(name.is_none());
                assert_eq!(definition_site.as_ref().unwrap().line, 7);
            }
            _ => panic!("expected function kind"),
        }
    }

    #[test]
    fn test_bare_arity_is_zero() {
        assert_eq!(EntityDescriptor::bare().arity(), 0);
        assert_eq!(EntityDescriptor::bare_labeled("lib.thing").arity(), 0);
    }

    #[test]
    fn test_owner_ignored_on_bare_entity() {
        let entity = EntityDescriptor::bare().with_owner("Nope");
        assert!(matches!(entity.kind(), EntityKind::Bare { label: None }));
    }

    #[test]
    fn test_concurrent_id_allocation() {
        use std::collections::HashSet;
        use std::thread;

        let mut handles = vec![];
        for _ in 0..8 {
            handles.push(thread::spawn(|| {
                (0..100).map(|_| EntityId::next().as_u64()).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate entity id {}", id);
            }
        }
    }
}
