//! Ordered stage setup: the page manifest, the sequencer that runs it, and the two
//! stateful stage components (preloader, menu).

pub mod manifest;
/// Fullscreen menu.
pub mod menu;
/// Load-progress preloader.
pub mod preloader;
/// Ordered, gated stage setup.
pub mod sequencer;
