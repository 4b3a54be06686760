//! Domain layer - pure deprecation-warning logic with no I/O.
//!
//! This layer contains the core concepts and invariants:
//! - Call frame values and site rendering
//! - Deprecated-entity descriptors captured at mark time
//! - Call-site fingerprints for warn-once deduplication
//! - Message synthesis for omitted messages
//!
//! All types in this layer are pure and easily testable.

pub mod entity;
pub mod fingerprint;
pub mod frame;
pub mod message;
