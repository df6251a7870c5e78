use crate::{
    foundation::core::TargetId,
    foundation::error::{StageError, StageResult},
    progress::geometry::GeometryProvider,
};

/// Scroll point at which a trigger fires.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerPoint {
    /// The element's top reaches `viewport_fraction` of the viewport height.
    Element {
        /// Observed element.
        target: TargetId,
        /// Fraction from the viewport top (`0.85` = 85 % down).
        viewport_fraction: f64,
    },
    /// The bottom of the document reaches the bottom of the viewport.
    DocumentEnd,
}

impl TriggerPoint {
    /// Scroll offset at which the point is crossed.
    pub fn resolve(&self, geo: &dyn GeometryProvider) -> StageResult<f64> {
        match self {
            Self::Element {
                target,
                viewport_fraction,
            } => {
                let top = geo
                    .element_offset(target)
                    .ok_or_else(|| StageError::missing_target(target.as_str()))?;
                Ok((top - geo.viewport().height * viewport_fraction).max(0.0))
            }
            Self::DocumentEnd => Ok(geo.document_extent()),
        }
    }
}

/// Firing policy of a [`ThresholdTrigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// Enter fires once for the trigger's lifetime.
    Once,
    /// Enter and leave-back fire on every crossing.
    Toggle,
}

/// Crossing direction reported by a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// Scrolled forward past the point.
    Enter,
    /// Scrolled back above the point.
    LeaveBack,
}

/// Viewport-intersection threshold evaluated against the scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTrigger {
    point: TriggerPoint,
    mode: TriggerMode,
    offset: f64,
    inside: bool,
    fired: bool,
    dirty: bool,
}

impl ThresholdTrigger {
    /// Resolve a trigger against the current layout.
    pub fn new(point: TriggerPoint, mode: TriggerMode, geo: &dyn GeometryProvider) -> StageResult<Self> {
        let offset = point.resolve(geo)?;
        Ok(Self {
            point,
            mode,
            offset,
            inside: false,
            fired: false,
            dirty: false,
        })
    }

    /// Scroll offset of the threshold.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether the position is currently past the threshold.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Mark the offset stale after a layout change.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Allow a `Once` trigger to fire again.
    pub fn reset(&mut self) {
        self.fired = false;
        self.inside = false;
    }

    /// Evaluate at `position`, returning a crossing when one happened.
    pub fn update(&mut self, position: f64, geo: &dyn GeometryProvider) -> Option<Crossing> {
        if self.dirty {
            self.dirty = false;
            match self.point.resolve(geo) {
                Ok(offset) => self.offset = offset,
                Err(err) => tracing::warn!(%err, "trigger keeps previous offset"),
            }
        }

        let past = position >= self.offset;
        match (self.inside, past) {
            (false, true) => {
                self.inside = true;
                match self.mode {
                    TriggerMode::Once if self.fired => None,
                    _ => {
                        self.fired = true;
                        Some(Crossing::Enter)
                    }
                }
            }
            (true, false) => {
                self.inside = false;
                (self.mode == TriggerMode::Toggle).then_some(Crossing::LeaveBack)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/trigger.rs"]
mod tests;
