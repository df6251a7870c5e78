//! Frame-driven runtime tying scroll, navigation, progress and stages together.

pub mod binding;
/// Presentation entry point.
pub mod presentation;
