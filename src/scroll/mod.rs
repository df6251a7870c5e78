//! Smooth-scroll emulation and input normalization.

/// Smooth-scroll emulator.
pub mod emulator;
/// Raw input events and normalization.
pub mod input;
