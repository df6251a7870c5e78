use crate::animation::ease::Ease;

/// One labelled step of a [`Timeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Name reported in events.
    pub label: String,
    /// Length in timeline seconds.
    pub duration_secs: f64,
    /// Easing applied to the segment's progress.
    pub ease: Ease,
}

impl Segment {
    /// Build a segment.
    pub fn new(label: impl Into<String>, duration_secs: f64, ease: Ease) -> Self {
        Self {
            label: label.into(),
            duration_secs,
            ease,
        }
    }
}

/// Playback notification from [`Timeline::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEvent {
    /// A segment moved forward.
    SegmentProgress {
        /// Segment position in the timeline.
        index: usize,
        /// Raw progress in `[0, 1]`.
        progress: f64,
        /// Eased progress.
        eased: f64,
    },
    /// A segment reached its end.
    SegmentComplete {
        /// Segment position in the timeline.
        index: usize,
    },
    /// The last segment completed. Fired once.
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct ScaleRamp {
    from: f64,
    to: f64,
    elapsed: f64,
    secs: f64,
}

/// Segments played back to back under a shared, rampable time scale.
#[derive(Clone, Debug)]
pub struct Timeline {
    segments: Vec<Segment>,
    current: usize,
    local_secs: f64,
    time_scale: f64,
    ramp: Option<ScaleRamp>,
    finished: bool,
}

impl Timeline {
    /// Build a timeline. An empty timeline finishes on its first advance.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            current: 0,
            local_secs: 0.0,
            time_scale: 1.0,
            ramp: None,
            finished: false,
        }
    }

    /// Segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Current playback rate.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Whether the last segment has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index of the segment currently playing.
    pub fn current_segment(&self) -> usize {
        self.current
    }

    /// Move the time scale to `to` over `over_secs` of wall-clock time.
    pub fn ramp_time_scale(&mut self, to: f64, over_secs: f64) {
        let to = to.max(0.0);
        if over_secs <= 0.0 {
            self.time_scale = to;
            self.ramp = None;
            return;
        }
        self.ramp = Some(ScaleRamp {
            from: self.time_scale,
            to,
            elapsed: 0.0,
            secs: over_secs,
        });
    }

    /// Advance by `dt` wall-clock seconds.
    pub fn advance(&mut self, dt: f64) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }

        if let Some(mut ramp) = self.ramp {
            ramp.elapsed += dt.max(0.0);
            let t = ramp.elapsed / ramp.secs;
            self.time_scale = ramp.from + (ramp.to - ramp.from) * Ease::OutQuad.apply(t);
            self.ramp = (t < 1.0).then_some(ramp);
        }

        let mut budget = dt.max(0.0) * self.time_scale;
        loop {
            let Some(seg) = self.segments.get(self.current) else {
                self.finished = true;
                events.push(TimelineEvent::Finished);
                return events;
            };

            let remaining = (seg.duration_secs - self.local_secs).max(0.0);
            if budget < remaining {
                self.local_secs += budget;
                let progress = self.local_secs / seg.duration_secs;
                events.push(TimelineEvent::SegmentProgress {
                    index: self.current,
                    progress,
                    eased: seg.ease.apply(progress),
                });
                return events;
            }

            budget -= remaining;
            events.push(TimelineEvent::SegmentProgress {
                index: self.current,
                progress: 1.0,
                eased: 1.0,
            });
            events.push(TimelineEvent::SegmentComplete {
                index: self.current,
            });
            self.current += 1;
            self.local_secs = 0.0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
