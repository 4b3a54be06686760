//! Mock implementations for testing.
//!
//! This module provides test doubles for infrastructure adapters,
//! enabling controlled testing of warn-once behavior.

pub mod clock;
pub mod sink;
pub mod stack;

pub use clock::MockClock;
pub use sink::MockSink;
pub use stack::MockStackProvider;
