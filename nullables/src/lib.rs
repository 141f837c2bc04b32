//! Nullable infrastructure for deterministic testing and replay.
//!
//! The two collaborators the council core consumes (a clock and a
//! notification sink) are abstracted behind traits in `council-types`.
//! This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what they were asked to do instead of delivering it
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod sink;

pub use clock::NullClock;
pub use sink::NullSink;
