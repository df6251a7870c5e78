//! Tween engine adapter: easing curves, free-running and scrubbed tweens, sequential
//! timelines, and the style sink they write into.

/// Easing curves.
pub mod ease;
/// Style properties and sinks.
pub mod style;
/// Sequential segment playback.
pub mod timeline;
/// Free-running and scrubbed tweens.
pub mod tween;
