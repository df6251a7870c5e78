//! Pure progress-to-style mappers for pinned sections.
//!
//! Every mapper is a function of `(progress, static config)`; the session applies results.

/// One-shot numeric count-up.
pub mod counter;
/// Stacked card deck.
pub mod deck;
/// Roadmap track and markers.
pub mod roadmap;
/// Horizontal slide tracks.
pub mod slider;
