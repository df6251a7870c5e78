use crate::{
    foundation::core::{TargetId, clamp01},
    foundation::error::{StageError, StageResult},
    progress::geometry::GeometryProvider,
};

/// Identifier of a registered pin zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ZoneId(pub usize);

/// How long a pin zone lasts in scroll pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneLength {
    /// Fixed distance.
    Fixed {
        /// Length in pixels.
        px: f64,
    },
    /// The full scroll width of a track.
    ScrollWidth {
        /// Track element.
        target: TargetId,
    },
    /// How far a track overflows the viewport horizontally.
    TrackOverflow {
        /// Track element.
        target: TargetId,
    },
}

/// Static description of a pin zone.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoneSpec {
    /// Element whose position starts the zone.
    pub trigger: TargetId,
    /// Viewport fraction the trigger's top must reach for the zone to start
    /// (`0.0` = top of the viewport).
    #[serde(default)]
    pub start_fraction: f64,
    /// Zone length.
    pub length: ZoneLength,
}

impl ZoneSpec {
    /// Resolve `(start, end)` scroll offsets against the current layout.
    pub fn resolve(&self, geo: &dyn GeometryProvider) -> StageResult<(f64, f64)> {
        let top = geo
            .element_offset(&self.trigger)
            .ok_or_else(|| StageError::missing_target(self.trigger.as_str()))?;
        let start = top - geo.viewport().height * self.start_fraction;
        let len = match &self.length {
            ZoneLength::Fixed { px } => *px,
            ZoneLength::ScrollWidth { target } => geo
                .scroll_width(target)
                .ok_or_else(|| StageError::missing_target(target.as_str()))?,
            ZoneLength::TrackOverflow { target } => {
                geo.scroll_width(target)
                    .ok_or_else(|| StageError::missing_target(target.as_str()))?
                    - geo.viewport().width
            }
        };
        Ok((start, start + len.max(0.0)))
    }
}

/// A scroll range whose normalized progress drives an animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PinZone {
    /// Registration id.
    pub id: ZoneId,
    /// Static description.
    pub spec: ZoneSpec,
    /// Scroll offset where progress is 0.
    pub start_offset: f64,
    /// Scroll offset where progress is 1.
    pub end_offset: f64,
    /// Last published progress.
    pub progress: f64,
    /// Bounds must be recomputed before the next use.
    pub dirty: bool,
}

impl PinZone {
    /// Progress at scroll `position`. Zero-length zones are pinned at 0.
    pub fn progress_at(&self, position: f64) -> f64 {
        let len = self.end_offset - self.start_offset;
        if !(len.is_finite() && len > 0.0) {
            return 0.0;
        }
        clamp01((position - self.start_offset) / len)
    }

    /// Whether the zone has no scrollable range.
    pub fn is_degenerate(&self) -> bool {
        let len = self.end_offset - self.start_offset;
        !(len.is_finite() && len > 0.0)
    }
}
