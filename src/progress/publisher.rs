use crate::{
    foundation::error::StageResult,
    progress::geometry::GeometryProvider,
    progress::zone::{PinZone, ZoneId, ZoneSpec},
};

/// Progress change for one zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressUpdate {
    /// Zone whose progress changed.
    pub zone: ZoneId,
    /// New progress in `[0, 1]`.
    pub progress: f64,
}

/// Computes and republishes normalized progress for every registered pin zone.
///
/// Zones are kept in registration order and updates come out in that order. Geometry is
/// resolved when a zone registers and again lazily after [`Self::invalidate_all`].
#[derive(Clone, Debug, Default)]
pub struct ProgressPublisher {
    zones: Vec<PinZone>,
    published: Vec<Option<f64>>,
}

impl ProgressPublisher {
    /// Publisher with no zones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone. Fails with `MissingTarget` when its elements are not on the page.
    #[tracing::instrument(skip(self, geo, spec), fields(trigger = %spec.trigger))]
    pub fn register(&mut self, spec: ZoneSpec, geo: &dyn GeometryProvider) -> StageResult<ZoneId> {
        let (start_offset, end_offset) = spec.resolve(geo)?;
        let id = ZoneId(self.zones.len());
        let zone = PinZone {
            id,
            spec,
            start_offset,
            end_offset,
            progress: 0.0,
            dirty: false,
        };
        if zone.is_degenerate() {
            tracing::warn!(zone = id.0, "pin zone has no scroll range; progress stays at 0");
        }
        tracing::debug!(zone = id.0, start_offset, end_offset, "pin zone registered");
        self.zones.push(zone);
        self.published.push(None);
        Ok(id)
    }

    /// Registered zones in registration order.
    pub fn zones(&self) -> &[PinZone] {
        &self.zones
    }

    /// Zone by id.
    pub fn zone(&self, id: ZoneId) -> Option<&PinZone> {
        self.zones.get(id.0)
    }

    /// Mark every zone's geometry stale.
    pub fn invalidate_all(&mut self) {
        for zone in &mut self.zones {
            zone.dirty = true;
        }
    }

    fn refresh(zone: &mut PinZone, geo: &dyn GeometryProvider) {
        if !zone.dirty {
            return;
        }
        zone.dirty = false;
        match zone.spec.resolve(geo) {
            Ok((start, end)) => {
                zone.start_offset = start;
                zone.end_offset = end;
                tracing::debug!(zone = zone.id.0, start, end, "pin zone recomputed");
            }
            Err(err) => {
                tracing::warn!(zone = zone.id.0, %err, "pin zone keeps previous bounds");
            }
        }
    }

    /// Recompute progress at `position` and return the zones whose value changed.
    pub fn on_scroll(&mut self, position: f64, geo: &dyn GeometryProvider) -> Vec<ProgressUpdate> {
        let mut updates = Vec::new();
        for (zone, last) in self.zones.iter_mut().zip(&mut self.published) {
            Self::refresh(zone, geo);
            let progress = zone.progress_at(position);
            zone.progress = progress;
            if *last != Some(progress) {
                *last = Some(progress);
                tracing::trace!(zone = zone.id.0, progress, "progress");
                updates.push(ProgressUpdate {
                    zone: zone.id,
                    progress,
                });
            }
        }
        updates
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/publisher.rs"]
mod tests;
