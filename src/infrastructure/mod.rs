//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Stack capture (the `backtrace` crate)
//! - The stderr diagnostic sink and terminal color detection
//! - Clock abstraction (system time vs mock)
//! - Warning-line rendering (ANSI color and plain layouts)
//! - Storage implementations (sharded maps)

pub mod clock;
pub mod format;
pub mod sink;
pub mod stack;
pub mod storage;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides controllable test doubles for testing
/// warn-once behavior.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// depwarn = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
