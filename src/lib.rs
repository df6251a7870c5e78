//! Scrollstage is a scroll-driven presentation engine.
//!
//! It turns raw wheel, touch and keyboard input into smooth or section-snapped scrolling,
//! publishes normalized progress for pinned scroll zones and viewport thresholds, and maps
//! that progress onto the animated state of a fixed sequence of page stages:
//!
//! - Load a [`PageManifest`] and an [`EngineConfig`]
//! - Build a [`Presentation`] against a [`GeometryProvider`]
//! - Feed input, then call [`Presentation::frame`] once per display frame with a
//!   [`StyleSink`] receiving the computed styles
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod animation;
pub mod foundation;
pub mod mappers;
pub mod navigation;
pub mod progress;
pub mod scroll;
pub mod session;
pub mod stages;

pub use crate::animation::ease::Ease;
pub use crate::animation::style::{StyleProp, StyleSink, StyleTable, StyleValue};
pub use crate::foundation::config::{EngineConfig, NavigationMode};
pub use crate::foundation::core::{TargetId, Vec2, Viewport};
pub use crate::foundation::error::{StageError, StageResult};
pub use crate::navigation::navigator::{NavOutcome, NavigationState};
pub use crate::progress::geometry::{GeometryProvider, StaticLayout};
pub use crate::scroll::input::{InputEvent, KeyCommand};
pub use crate::session::presentation::{FrameReport, InputCtx, InputOutcome, Presentation};
pub use crate::stages::manifest::{PageManifest, StageName};
