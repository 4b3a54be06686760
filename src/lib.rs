//! # depwarn
//!
//! Deduplicated deprecation warnings with call-site tracking.
//!
//! This crate lets a library author mark a function or code path as
//! deprecated and have a single, human-readable warning written to the
//! diagnostic stream the first time each distinct call site exercises that
//! path — not on every invocation. Warnings are keyed by the pair of
//! (deprecated entity, call-site location): the same deprecated function
//! called from two places warns twice, two different deprecated functions
//! called from the same line warn twice, and repeated calls from one place
//! warn once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use depwarn::{Deprecation, EntityDescriptor};
//!
//! // One emitter per library, bound to its namespace.
//! let deprecate = Deprecation::new("my-lib").unwrap();
//!
//! // Call-style: warn from deprecated code paths.
//! deprecate.warn("my-lib::old_api is deprecated, use new_api instead").ok();
//!
//! // Wrap-style: mark a whole function as deprecated.
//! let oldfn = deprecate.function(
//!     |a: i32, b: i32| b,
//!     EntityDescriptor::named("oldfn").with_owner("MyLib").with_arity(2),
//! );
//! assert_eq!(oldfn.call((1, 2)), 2); // warns once per call site, forwards args
//! ```
//!
//! ## Output
//!
//! When stderr is an interactive, color-capable terminal the warning is a
//! single ANSI-colored line:
//!
//! ```text
//! my-lib deprecated MyLib.oldfn at src/caller.rs:42:7
//! ```
//!
//! Otherwise the same fields are rendered plain with an explicit UTC
//! timestamp prepended:
//!
//! ```text
//! Tue, 01 Jul 2014 14:22:28 GMT my-lib deprecated MyLib.oldfn at src/caller.rs:42:7
//! ```
//!
//! Either way the location is the *caller's* file, line, and column — never
//! a frame of this crate's own machinery.
//!
//! ## Message Synthesis
//!
//! When no explicit message is supplied, one is derived from the
//! [`EntityDescriptor`] captured at mark-deprecated time: `Owner.name` for
//! method-style access, the bare declared name otherwise, the access-path
//! label for unnamed functions retrieved through an object, and an
//! `<anonymous@file:line:col>` tag for the rest. An explicit message always
//! wins.
//!
//! ## Environment
//!
//! - `NO_DEPRECATION=my-lib,other-lib` (or `*`) suppresses warnings for the
//!   listed namespaces; resolved once at emitter construction.
//! - `TRACE_DEPRECATION=my-lib` (or `*`) appends the full caller stack to
//!   each warning.
//!
//! ## Testing
//!
//! Every external collaborator sits behind a port
//! ([`StackProvider`], [`DiagnosticSink`], [`Clock`], [`Storage`]), and the
//! `test-helpers` feature exposes mock adapters plus an explicit seen-set
//! reset, so warn-once behavior is fully testable without touching the real
//! stderr or the real stack.
//!
//! ## Scope
//!
//! Not a logging framework: exactly one message class (deprecation), one
//! severity, one delivery channel. The seen-set grows monotonically and is
//! never pruned — call sites are bounded by source code size, not request
//! volume.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    entity::{EntityDescriptor, EntityId, EntityKind},
    fingerprint::Fingerprint,
    frame::{CallFrame, SourceSite},
    message::synthesize,
};

pub use application::{
    cache::{CallSiteCache, SiteState},
    capture::FrameCapture,
    emitter::{ConfigError, DefaultStorage, Deprecation, DeprecationBuilder},
    ports::{Clock, DiagnosticSink, StackProvider, Storage},
    wrap::{DeprecatedFn, FnArgs},
};

pub use infrastructure::{
    clock::SystemClock,
    format::{render, RenderOptions},
    sink::StderrSink,
    stack::BacktraceProvider,
    storage::ShardedStorage,
};
