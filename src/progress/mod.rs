//! Progress publishing for pin zones and viewport-threshold triggers.
//!
//! Geometry comes from a [`geometry::GeometryProvider`]; nothing here caches layout past an
//! explicit invalidation.

/// Layout queries.
pub mod geometry;
/// Pin zone progress fan-out.
pub mod publisher;
/// Viewport thresholds.
pub mod trigger;
/// Pin zone bounds.
pub mod zone;
