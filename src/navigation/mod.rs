//! Discrete section navigation built on the continuous scroll position.

/// Idle/transitioning jump state machine.
pub mod navigator;
/// Ordered section offsets.
pub mod sections;
