use crate::{
    animation::ease::Ease,
    animation::style::StyleProp,
    foundation::core::{TargetId, Vec2, clamp01},
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Opaque identifier of a tween owned by a [`TweenEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenHandle(pub u64);

/// One animated property with its endpoints.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropTrack {
    /// Property written on every update.
    pub prop: StyleProp,
    /// Value at progress 0.
    pub from: f64,
    /// Value at progress 1.
    pub to: f64,
}

impl PropTrack {
    /// Build a track from `from` to `to`.
    pub fn new(prop: StyleProp, from: f64, to: f64) -> Self {
        Self { prop, from, to }
    }
}

/// What advances a tween.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenDriver {
    /// Wall-clock playback after an optional delay.
    Duration {
        /// Playback length in seconds (`> 0`).
        secs: f64,
        /// Idle time before playback starts.
        #[serde(default)]
        delay_secs: f64,
    },
    /// Progress supplied from outside via [`TweenEngine::scrub`].
    Scrub,
}

/// Everything needed to start a tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Element the values are written to.
    pub target: TargetId,
    /// Animated properties.
    pub tracks: Vec<PropTrack>,
    /// Time source.
    pub driver: TweenDriver,
    /// Easing applied to raw progress.
    pub ease: Ease,
}

impl TweenSpec {
    /// Free-running tween of `secs` seconds.
    pub fn timed(target: TargetId, tracks: Vec<PropTrack>, secs: f64, ease: Ease) -> Self {
        Self {
            target,
            tracks,
            driver: TweenDriver::Duration {
                secs,
                delay_secs: 0.0,
            },
            ease,
        }
    }

    /// Externally driven tween.
    pub fn scrubbed(target: TargetId, tracks: Vec<PropTrack>, ease: Ease) -> Self {
        Self {
            target,
            tracks,
            driver: TweenDriver::Scrub,
            ease,
        }
    }

    /// Same tween with a start delay (no effect on scrubbed tweens).
    pub fn with_delay(mut self, delay: f64) -> Self {
        if let TweenDriver::Duration { delay_secs, .. } = &mut self.driver {
            *delay_secs = delay.max(0.0);
        }
        self
    }

    /// Sample every track at raw progress `t`.
    pub fn sample(&self, t: f64) -> Vec<(StyleProp, f64)> {
        let te = self.ease.apply(t);
        self.tracks
            .iter()
            .map(|tr| (tr.prop.clone(), <f64 as Lerp>::lerp(&tr.from, &tr.to, te)))
            .collect()
    }
}

/// Clone `base` once per target, delaying each copy by `each_secs` more than the previous.
pub fn stagger(base: &TweenSpec, targets: &[TargetId], each_secs: f64) -> Vec<TweenSpec> {
    let base_delay = match base.driver {
        TweenDriver::Duration { delay_secs, .. } => delay_secs,
        TweenDriver::Scrub => 0.0,
    };
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let mut spec = base.clone();
            spec.target = target.clone();
            spec.with_delay(base_delay + each_secs * i as f64)
        })
        .collect()
}

/// Notification produced by a [`TweenEngine`].
///
/// These stand in for update/complete callbacks: the caller dispatches them in the order
/// they are returned.
#[derive(Clone, Debug, PartialEq)]
pub enum TweenEvent {
    /// New values were computed.
    Update {
        /// Tween that produced the values.
        handle: TweenHandle,
        /// Element the values belong to.
        target: TargetId,
        /// Current value per property.
        values: Vec<(StyleProp, f64)>,
        /// Raw (un-eased) progress in `[0, 1]`.
        progress: f64,
    },
    /// A free-running tween reached its end. Fired once per tween.
    Complete {
        /// Finished tween.
        handle: TweenHandle,
        /// Element it animated.
        target: TargetId,
    },
}

/// Black-box animation executor.
pub trait TweenEngine {
    /// Start a tween and return its handle.
    fn animate(&mut self, spec: TweenSpec) -> TweenHandle;
    /// Stop a tween without a completion event. Unknown handles are ignored.
    fn cancel(&mut self, handle: TweenHandle);
    /// Change the playback rate of a free-running tween.
    fn set_time_scale(&mut self, handle: TweenHandle, factor: f64);
    /// Drive a scrubbed tween to `progress` and return the resulting update.
    fn scrub(&mut self, handle: TweenHandle, progress: f64) -> Option<TweenEvent>;
    /// Advance free-running tweens by `dt` seconds.
    fn advance(&mut self, dt: f64) -> Vec<TweenEvent>;
    /// Whether `handle` still refers to a live tween.
    fn is_active(&self, handle: TweenHandle) -> bool;
}

#[derive(Clone, Debug)]
struct ActiveTween {
    handle: TweenHandle,
    spec: TweenSpec,
    elapsed: f64,
    time_scale: f64,
}

/// Built-in [`TweenEngine`]: a list of tweens advanced in creation order.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    next_id: u64,
    tweens: Vec<ActiveTween>,
}

impl TweenSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Return `true` when no tween is live.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    fn find_mut(&mut self, handle: TweenHandle) -> Option<&mut ActiveTween> {
        self.tweens.iter_mut().find(|t| t.handle == handle)
    }
}

impl TweenEngine for TweenSet {
    fn animate(&mut self, spec: TweenSpec) -> TweenHandle {
        self.next_id += 1;
        let handle = TweenHandle(self.next_id);
        tracing::trace!(?handle, element = %spec.target, "tween started");
        self.tweens.push(ActiveTween {
            handle,
            spec,
            elapsed: 0.0,
            time_scale: 1.0,
        });
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) {
        self.tweens.retain(|t| t.handle != handle);
    }

    fn set_time_scale(&mut self, handle: TweenHandle, factor: f64) {
        if let Some(t) = self.find_mut(handle) {
            t.time_scale = factor.max(0.0);
        }
    }

    fn scrub(&mut self, handle: TweenHandle, progress: f64) -> Option<TweenEvent> {
        let t = self.find_mut(handle)?;
        if t.spec.driver != TweenDriver::Scrub {
            return None;
        }
        let p = clamp01(progress);
        Some(TweenEvent::Update {
            handle,
            target: t.spec.target.clone(),
            values: t.spec.sample(p),
            progress: p,
        })
    }

    fn advance(&mut self, dt: f64) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        let mut finished = Vec::new();

        for t in &mut self.tweens {
            let TweenDriver::Duration { secs, delay_secs } = t.spec.driver else {
                continue;
            };
            t.elapsed += dt.max(0.0) * t.time_scale;
            if t.elapsed < delay_secs {
                continue;
            }
            let p = if secs > 0.0 {
                clamp01((t.elapsed - delay_secs) / secs)
            } else {
                1.0
            };
            events.push(TweenEvent::Update {
                handle: t.handle,
                target: t.spec.target.clone(),
                values: t.spec.sample(p),
                progress: p,
            });
            if p >= 1.0 {
                events.push(TweenEvent::Complete {
                    handle: t.handle,
                    target: t.spec.target.clone(),
                });
                finished.push(t.handle);
            }
        }

        if !finished.is_empty() {
            self.tweens.retain(|t| !finished.contains(&t.handle));
        }
        events
    }

    fn is_active(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
