//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and manages the runtime behavior:
//! - Caller-frame selection (capture)
//! - Warn-once seen-set (cache)
//! - The emitter facade and its builder
//! - The function-wrapping combinator
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod cache;
pub mod capture;
pub mod emitter;
pub mod ports;
pub mod wrap;
