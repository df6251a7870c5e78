use crate::{
    animation::ease::Ease,
    foundation::config::ScrollConfig,
    scroll::input::{InputSource, ScrollDelta},
};

/// Continuous virtual scroll position, written only by [`SmoothScroll`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct VirtualScrollState {
    /// Position applied to the viewport.
    pub position: f64,
    /// Change per second over the last tick.
    pub velocity: f64,
    /// Position the emulator is converging toward.
    pub target_position: f64,
}

/// Identifier of a programmatic scroll-to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ScrollToId(pub u64);

/// Options for a programmatic scroll-to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollToOpts {
    /// Playback length in seconds. Non-positive durations land on the next tick.
    pub duration_secs: f64,
    /// Easing of the scroll curve.
    pub ease: Ease,
    /// A protected scroll-to survives free input and rejects newer scroll-to requests.
    pub protect: bool,
}

/// Result of one [`SmoothScroll::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollTick {
    /// New position, when it moved this frame.
    pub changed: Option<f64>,
    /// Scroll-to requests that reached their destination this frame.
    pub finished: Vec<ScrollToId>,
    /// Scroll-to requests superseded since the previous tick.
    pub cancelled: Vec<ScrollToId>,
}

/// Seam through which other components request programmatic scrolling.
pub trait ScrollDriver {
    /// Start scrolling to `offset`. `None` when a protected scroll-to is in flight.
    fn scroll_to(&mut self, offset: f64, opts: ScrollToOpts) -> Option<ScrollToId>;
    /// Current virtual position.
    fn position(&self) -> f64;
}

#[derive(Clone, Copy, Debug)]
struct ScrollToTween {
    id: ScrollToId,
    from: f64,
    to: f64,
    elapsed: f64,
    opts: ScrollToOpts,
}

/// Smooth-scroll emulator.
///
/// Free input moves `target_position`; each tick the position approaches it exponentially
/// (`position += (target - position) * (1 - e^(-dt / tau))`), so it converges without
/// overshoot. A programmatic scroll-to replaces the free approach with an eased tween until it
/// completes or is superseded.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    state: VirtualScrollState,
    extent: f64,
    cfg: ScrollConfig,
    active: Option<ScrollToTween>,
    cancelled: Vec<ScrollToId>,
    last_emitted: f64,
    next_id: u64,
}

impl SmoothScroll {
    /// Emulator over a document that can scroll `extent` pixels.
    pub fn new(cfg: ScrollConfig, extent: f64) -> Self {
        Self {
            state: VirtualScrollState::default(),
            extent: extent.max(0.0),
            cfg,
            active: None,
            cancelled: Vec::new(),
            last_emitted: 0.0,
            next_id: 0,
        }
    }

    /// Read-only view of the scroll state.
    pub fn state(&self) -> VirtualScrollState {
        self.state
    }

    /// Maximum scroll offset.
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Whether a programmatic scroll-to is in flight.
    pub fn is_scrolling_to(&self) -> bool {
        self.active.is_some()
    }

    /// Time constant of the free approach. About 99 % of a move settles within `duration_secs`.
    fn tau(&self) -> f64 {
        self.cfg.duration_secs / 5.0
    }

    /// Update the scrollable extent after a layout change and re-clamp everything.
    pub fn set_extent(&mut self, extent: f64) {
        self.extent = extent.max(0.0);
        self.state.position = self.state.position.clamp(0.0, self.extent);
        self.state.target_position = self.state.target_position.clamp(0.0, self.extent);
        if let Some(tween) = &mut self.active {
            tween.to = tween.to.clamp(0.0, self.extent);
        }
    }

    /// Point the in-flight scroll-to `id` at `offset`. Playback restarts from the current
    /// position over the time it had left. Returns `false` when `id` is not in flight.
    pub fn retarget(&mut self, id: ScrollToId, offset: f64) -> bool {
        let Some(tween) = self.active.as_mut().filter(|t| t.id == id) else {
            return false;
        };
        tween.opts.duration_secs = (tween.opts.duration_secs - tween.elapsed).max(0.0);
        tween.elapsed = 0.0;
        tween.from = self.state.position;
        tween.to = offset.clamp(0.0, self.extent);
        tracing::debug!(id = id.0, to = tween.to, "scroll-to retargeted");
        true
    }

    /// Place the viewport at `offset` without easing (initial restore).
    pub fn jump_to(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.extent);
        self.state.position = offset;
        self.state.target_position = offset;
        self.state.velocity = 0.0;
    }

    /// Feed free-scroll input. Returns `false` when a protected scroll-to swallowed it.
    pub fn push_delta(&mut self, delta: ScrollDelta) -> bool {
        if let Some(tween) = self.active {
            if tween.opts.protect {
                tracing::trace!(source = ?delta.source, "free input ignored during protected scroll-to");
                return false;
            }
            self.cancel_active();
        }
        let step = delta.delta_y * self.cfg.sensitivity;
        self.state.target_position = (self.state.target_position + step).clamp(0.0, self.extent);
        if delta.source == InputSource::Key {
            tracing::trace!(to = self.state.target_position, "key scroll");
        }
        true
    }

    fn cancel_active(&mut self) {
        if let Some(tween) = self.active.take() {
            tracing::debug!(id = tween.id.0, "scroll-to superseded");
            self.cancelled.push(tween.id);
            self.state.target_position = self.state.position;
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> ScrollTick {
        let dt = dt.max(0.0);
        let before = self.state.position;
        let mut finished = Vec::new();

        if let Some(mut tween) = self.active.take() {
            tween.elapsed += dt;
            let t = if tween.opts.duration_secs > 0.0 {
                tween.elapsed / tween.opts.duration_secs
            } else {
                1.0
            };
            let te = tween.opts.ease.apply(t);
            self.state.position = tween.from + (tween.to - tween.from) * te;
            self.state.target_position = self.state.position;
            if t >= 1.0 {
                self.state.position = tween.to;
                self.state.target_position = tween.to;
                finished.push(tween.id);
            } else {
                self.active = Some(tween);
            }
        } else {
            let diff = self.state.target_position - self.state.position;
            if diff.abs() <= self.cfg.snap_epsilon {
                self.state.position = self.state.target_position;
            } else if dt > 0.0 {
                let alpha = 1.0 - (-dt / self.tau()).exp();
                self.state.position += diff * alpha;
            }
        }

        self.state.velocity = if dt > 0.0 {
            (self.state.position - before) / dt
        } else {
            0.0
        };

        let changed = (self.state.position != self.last_emitted).then(|| {
            self.last_emitted = self.state.position;
            self.state.position
        });

        ScrollTick {
            changed,
            finished,
            cancelled: std::mem::take(&mut self.cancelled),
        }
    }
}

impl ScrollDriver for SmoothScroll {
    fn scroll_to(&mut self, offset: f64, opts: ScrollToOpts) -> Option<ScrollToId> {
        if let Some(tween) = self.active {
            if tween.opts.protect {
                tracing::debug!(id = tween.id.0, "scroll-to rejected, in-flight request is protected");
                return None;
            }
            self.cancel_active();
        }
        self.next_id += 1;
        let id = ScrollToId(self.next_id);
        let to = offset.clamp(0.0, self.extent);
        tracing::debug!(id = id.0, from = self.state.position, to, "scroll-to");
        self.active = Some(ScrollToTween {
            id,
            from: self.state.position,
            to,
            elapsed: 0.0,
            opts,
        });
        Some(id)
    }

    fn position(&self) -> f64 {
        self.state.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/emulator.rs"]
mod tests;
