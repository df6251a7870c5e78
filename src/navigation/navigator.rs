use crate::{
    foundation::config::NavigationConfig,
    foundation::core::Direction,
    navigation::sections::SectionList,
    scroll::emulator::{ScrollDriver, ScrollToId, ScrollToOpts},
    scroll::input::KeyCommand,
};

/// Process-wide navigation state, mutated only by [`Navigator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct NavigationState {
    /// Index of the current section.
    pub current_index: usize,
    /// Lock held between a jump and its scroll-to completion.
    pub is_transitioning: bool,
    /// Signed wheel delta gathered toward the next jump.
    pub accumulated_delta: f64,
}

/// What a navigation request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Dropped: a transition is running, the gesture was too short, or the scroll was refused.
    Ignored,
    /// Wheel delta was added to the accumulator without reaching the threshold.
    Accumulating,
    /// A jump started.
    Jumping {
        /// Section left.
        from: usize,
        /// Section being scrolled to.
        to: usize,
    },
    /// The request pointed past the first or last section; nothing moved.
    AtBound,
}

#[derive(Clone, Copy, Debug)]
struct PendingJump {
    target_index: usize,
    scroll: ScrollToId,
}

/// Discrete section navigator on top of continuous scroll.
///
/// States are `Idle` and `Transitioning`. Wheel input accumulates against a threshold and a
/// debounce window, touch gestures are judged once at touch end, keys jump directly. While
/// transitioning every request is dropped, never queued. The lock is released by the
/// scroll-to completing or being cancelled.
#[derive(Clone, Debug)]
pub struct Navigator {
    state: NavigationState,
    cfg: NavigationConfig,
    sections: SectionList,
    pending: Option<PendingJump>,
    debounce_deadline_ms: Option<f64>,
    touch_start_y: Option<f64>,
}

impl Navigator {
    /// Navigator over `sections`, starting at the active one.
    pub fn new(cfg: NavigationConfig, sections: SectionList) -> Self {
        let state = NavigationState {
            current_index: sections.active_index(),
            ..NavigationState::default()
        };
        Self {
            state,
            cfg,
            sections,
            pending: None,
            debounce_deadline_ms: None,
            touch_start_y: None,
        }
    }

    /// Read-only view of the navigation state.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Sections in document order.
    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    /// Section index and scroll-to of the jump in flight, if any.
    pub fn pending_jump(&self) -> Option<(usize, ScrollToId)> {
        self.pending.map(|p| (p.target_index, p.scroll))
    }

    /// Wheel delta at `now_ms`.
    pub fn on_wheel(
        &mut self,
        delta_y: f64,
        now_ms: f64,
        driver: &mut impl ScrollDriver,
    ) -> NavOutcome {
        if self.state.is_transitioning {
            return NavOutcome::Ignored;
        }
        self.poll(now_ms);

        self.state.accumulated_delta += delta_y;
        self.debounce_deadline_ms = Some(now_ms + self.cfg.debounce_ms);

        if self.state.accumulated_delta.abs() < self.cfg.wheel_threshold {
            return NavOutcome::Accumulating;
        }

        let dir = Direction::from_delta(self.state.accumulated_delta);
        self.state.accumulated_delta = 0.0;
        self.debounce_deadline_ms = None;
        match dir {
            Some(dir) => self.step(dir, driver),
            None => NavOutcome::Ignored,
        }
    }

    /// Finger down at client `y`.
    pub fn on_touch_start(&mut self, y: f64) {
        self.touch_start_y = Some(y);
    }

    /// Finger lifted at client `y`; the whole gesture is judged here.
    pub fn on_touch_end(&mut self, y: f64, driver: &mut impl ScrollDriver) -> NavOutcome {
        let Some(start) = self.touch_start_y.take() else {
            return NavOutcome::Ignored;
        };
        if self.state.is_transitioning {
            return NavOutcome::Ignored;
        }
        let delta = start - y;
        if delta.abs() <= self.cfg.touch_threshold {
            return NavOutcome::Ignored;
        }
        match Direction::from_delta(delta) {
            Some(dir) => self.step(dir, driver),
            None => NavOutcome::Ignored,
        }
    }

    /// Keyboard command.
    pub fn on_key(&mut self, command: KeyCommand, driver: &mut impl ScrollDriver) -> NavOutcome {
        if self.state.is_transitioning {
            return NavOutcome::Ignored;
        }
        match command {
            KeyCommand::Next => self.step(Direction::Forward, driver),
            KeyCommand::Previous => self.step(Direction::Backward, driver),
            KeyCommand::First => self.go_to(0, driver),
            KeyCommand::Last => self.go_to(self.sections.len() - 1, driver),
        }
    }

    /// Drop accumulated wheel delta once the debounce window has passed.
    pub fn poll(&mut self, now_ms: f64) {
        if let Some(deadline) = self.debounce_deadline_ms
            && now_ms >= deadline
        {
            if self.state.accumulated_delta != 0.0 {
                tracing::trace!(dropped = self.state.accumulated_delta, "wheel accumulator reset");
            }
            self.state.accumulated_delta = 0.0;
            self.debounce_deadline_ms = None;
        }
    }

    fn step(&mut self, dir: Direction, driver: &mut impl ScrollDriver) -> NavOutcome {
        let target = self.state.current_index as isize + dir.step();
        let last = self.sections.len() as isize - 1;
        self.go_to(target.clamp(0, last) as usize, driver)
    }

    /// Jump to `index` (clamped to the section range).
    pub fn go_to(&mut self, index: usize, driver: &mut impl ScrollDriver) -> NavOutcome {
        if self.state.is_transitioning {
            return NavOutcome::Ignored;
        }
        let target = index.min(self.sections.len() - 1);
        let from = self.state.current_index;
        if target == from {
            return NavOutcome::AtBound;
        }
        let Some(section) = self.sections.get(target) else {
            return NavOutcome::Ignored;
        };

        let opts = ScrollToOpts {
            duration_secs: self.cfg.jump_duration_secs,
            ease: self.cfg.jump_ease,
            protect: true,
        };
        let Some(scroll) = driver.scroll_to(section.dom_offset, opts) else {
            return NavOutcome::Ignored;
        };

        tracing::debug!(from, to = target, offset = section.dom_offset, "section jump");
        self.state.is_transitioning = true;
        self.state.accumulated_delta = 0.0;
        self.debounce_deadline_ms = None;
        self.pending = Some(PendingJump {
            target_index: target,
            scroll,
        });
        NavOutcome::Jumping { from, to: target }
    }

    /// The scroll-to `id` landed. Returns `true` when it was this navigator's jump.
    pub fn on_scroll_finished(&mut self, id: ScrollToId) -> bool {
        let Some(pending) = self.pending.filter(|p| p.scroll == id) else {
            return false;
        };
        self.pending = None;
        self.state.current_index = pending.target_index;
        self.state.is_transitioning = false;
        self.sections.activate(pending.target_index);
        tracing::debug!(index = pending.target_index, "section jump complete");
        true
    }

    /// The scroll-to `id` was superseded at `position`. The lock is released and the current
    /// section follows wherever the viewport stopped.
    pub fn on_scroll_cancelled(&mut self, id: ScrollToId, position: f64) -> bool {
        if !self.pending.is_some_and(|p| p.scroll == id) {
            return false;
        }
        self.pending = None;
        self.state.is_transitioning = false;
        tracing::warn!(position, "section jump interrupted");
        self.sync_to_position(position);
        true
    }

    /// Make the section containing `position` current. No effect while transitioning.
    pub fn sync_to_position(&mut self, position: f64) {
        if self.state.is_transitioning {
            return;
        }
        let index = self
            .sections
            .index_for_position(position, self.cfg.initial_tolerance);
        if index != self.state.current_index {
            tracing::debug!(index, position, "current section follows scroll position");
        }
        self.state.current_index = index;
        self.sections.activate(index);
    }

    /// Replace section offsets after a layout change.
    pub fn recompute_offsets(&mut self, offsets: &[f64]) {
        self.sections.recompute(offsets);
    }

    /// Offset of the current section.
    pub fn current_offset(&self) -> f64 {
        self.sections
            .get(self.state.current_index)
            .map_or(0.0, |s| s.dom_offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/navigator.rs"]
mod tests;
