use crate::{
    animation::ease::Ease,
    animation::style::{StyleProp, StyleSink, StyleValue},
    foundation::config::{EngineConfig, NavigationMode},
    foundation::core::TargetId,
    foundation::error::{StageError, StageResult},
    mappers::slider::snap_progress,
    navigation::navigator::{NavOutcome, NavigationState, Navigator},
    navigation::sections::SectionList,
    progress::geometry::GeometryProvider,
    scroll::emulator::{ScrollDriver, ScrollToOpts, SmoothScroll},
    scroll::input::{InputEvent, InputNormalizer},
    session::binding::Scene,
    stages::manifest::{PageManifest, StageName, StageSpec},
    stages::menu::MenuAction,
    stages::sequencer::{Sequencer, SetupReport, StageRunner, StageStatus},
};

/// Element whose `ScrollTop` mirrors the virtual scroll position.
pub const DOCUMENT: &str = "document";

const SLIDE_SETTLE_SECS: f64 = 0.5;
const SLIDE_SETTLE_DELAY_MS: f64 = 100.0;

/// Context of one input event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCtx {
    /// Event timestamp in milliseconds.
    pub now_ms: f64,
    /// Keyboard focus is in a text entry, so input must reach the page untouched.
    pub focus_in_text_entry: bool,
}

/// Where an input event went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Handled by the section navigator.
    Navigation(NavOutcome),
    /// Fed to the smooth-scroll emulator; `accepted` is `false` when a protected
    /// scroll-to swallowed it.
    FreeScroll {
        /// Whether the delta moved the scroll target.
        accepted: bool,
    },
    /// Produced no scroll delta.
    Dropped,
}

/// Summary of one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Frame timestamp in milliseconds.
    pub now_ms: f64,
    /// Virtual scroll position after the frame.
    pub position: f64,
    /// Current section index.
    pub current_section: usize,
    /// Whether a section jump is in flight.
    pub is_transitioning: bool,
    /// Preloader percentage while it runs.
    pub preloader_percent: Option<u32>,
    /// Stages set up during this frame.
    pub stages_started: Vec<StageName>,
    /// Progress updates dispatched.
    pub zone_updates: usize,
    /// Trigger crossings handled.
    pub crossings: usize,
    /// Tween updates and completions applied.
    pub tween_events: usize,
}

struct StageBinder<'a> {
    scene: &'a mut Scene,
    cfg: &'a EngineConfig,
    geo: &'a dyn GeometryProvider,
    sink: &'a mut dyn StyleSink,
}

impl StageRunner for StageBinder<'_> {
    #[tracing::instrument(skip_all, fields(stage = ?stage.name))]
    fn setup(&mut self, stage: &StageSpec) -> StageResult<SetupReport> {
        let mut report = SetupReport::default();
        for binding in &stage.bindings {
            if let Some(missing) = binding
                .required_targets()
                .into_iter()
                .find(|t| !self.geo.contains(t))
            {
                tracing::warn!(element = %missing, "binding skipped, element not on the page");
                report.skipped += 1;
                continue;
            }
            match self.scene.bind(binding, self.cfg, self.geo, &mut *self.sink) {
                Ok(awaits) => {
                    report.bound += 1;
                    report.awaits_completion |= awaits;
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(%err, "binding skipped");
                    report.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }
}

/// The whole scroll-driven presentation: emulator, navigator, stages and bindings driven
/// one frame at a time against a geometry provider and a style sink.
///
/// Per frame the order is fixed: preloader, gated stage release, emulator tick, jump
/// completion, debounce, section follow, progress fan-out, triggers, tweens.
pub struct Presentation {
    cfg: EngineConfig,
    section_targets: Vec<TargetId>,
    scroll: SmoothScroll,
    navigator: Navigator,
    normalizer: InputNormalizer,
    sequencer: Sequencer,
    scene: Scene,
    last_frame_ms: Option<f64>,
    force_publish: bool,
    was_moving: bool,
    settle_at_ms: Option<f64>,
    free_scrolled: bool,
}

impl Presentation {
    /// Validate the inputs and measure the sections against `geo`.
    pub fn new(
        cfg: EngineConfig,
        manifest: PageManifest,
        geo: &dyn GeometryProvider,
    ) -> StageResult<Self> {
        cfg.validate()?;
        manifest.validate()?;

        let mut section_targets = Vec::new();
        let mut offsets = Vec::new();
        for target in manifest.sections {
            match geo.element_offset(&target) {
                Some(offset) => {
                    offsets.push(offset);
                    section_targets.push(target);
                }
                None => tracing::warn!(element = %target, "section not on the page"),
            }
        }
        if offsets.is_empty() {
            return Err(StageError::geometry("no section is on the page"));
        }
        let sections = SectionList::from_offsets(&offsets)?;
        tracing::info!(sections = sections.len(), stages = manifest.stages.len(), "presentation built");

        Ok(Self {
            scroll: SmoothScroll::new(cfg.scroll.clone(), geo.document_extent()),
            navigator: Navigator::new(cfg.navigation.clone(), sections),
            normalizer: InputNormalizer::new(),
            sequencer: Sequencer::new(manifest.stages),
            scene: Scene::default(),
            section_targets,
            cfg,
            last_frame_ms: None,
            force_publish: true,
            was_moving: false,
            settle_at_ms: None,
            free_scrolled: false,
        })
    }

    /// Restore `initial_scroll`, pick the section it lands in and set up stages up to the
    /// first gated one. Returns the stages set up.
    pub fn start(
        &mut self,
        initial_scroll: f64,
        geo: &dyn GeometryProvider,
        sink: &mut dyn StyleSink,
    ) -> Vec<StageName> {
        self.scroll.jump_to(initial_scroll);
        let position = self.scroll.position();
        self.navigator.sync_to_position(position);
        sink.apply(&TargetId::new(DOCUMENT), StyleProp::ScrollTop, StyleValue::Number(position));
        tracing::info!(position, section = self.navigator.state().current_index, "presentation started");
        self.run_stages(geo, sink)
    }

    fn run_stages(&mut self, geo: &dyn GeometryProvider, sink: &mut dyn StyleSink) -> Vec<StageName> {
        let mut binder = StageBinder {
            scene: &mut self.scene,
            cfg: &self.cfg,
            geo,
            sink,
        };
        let ran = self.sequencer.advance(&mut binder);
        if !ran.is_empty() {
            self.force_publish = true;
        }
        ran
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Navigation state.
    pub fn navigation(&self) -> NavigationState {
        self.navigator.state()
    }

    /// Current virtual scroll position.
    pub fn position(&self) -> f64 {
        self.scroll.position()
    }

    /// Setup status of every stage in run order.
    pub fn stage_statuses(&self) -> Vec<(StageName, StageStatus)> {
        self.sequencer
            .statuses()
            .map(|(name, status)| (name, status.clone()))
            .collect()
    }

    /// Whether every stage has been set up.
    pub fn stages_complete(&self) -> bool {
        self.sequencer.is_complete()
    }

    /// Whether the menu is open.
    pub fn menu_open(&self) -> bool {
        self.scene.menu.as_ref().is_some_and(|m| m.is_open())
    }

    /// Route one raw input event.
    pub fn handle_input(&mut self, event: InputEvent, ctx: InputCtx) -> InputOutcome {
        let snap = self.cfg.navigation.mode == NavigationMode::Snap;
        if snap && !ctx.focus_in_text_entry {
            let outcome = match event {
                InputEvent::Wheel { delta_y } => {
                    self.navigator.on_wheel(delta_y, ctx.now_ms, &mut self.scroll)
                }
                InputEvent::TouchStart { y } => {
                    self.navigator.on_touch_start(y);
                    NavOutcome::Ignored
                }
                // Moves are suppressed; the gesture is judged on release.
                InputEvent::TouchMove { .. } => NavOutcome::Ignored,
                InputEvent::TouchEnd { y } => self.navigator.on_touch_end(y, &mut self.scroll),
                InputEvent::Key { command } => self.navigator.on_key(command, &mut self.scroll),
            };
            return InputOutcome::Navigation(outcome);
        }
        // Keys belong to the focused field.
        if ctx.focus_in_text_entry && matches!(event, InputEvent::Key { .. }) {
            return InputOutcome::Dropped;
        }

        match self.normalizer.normalize(event, self.cfg.scroll.key_step) {
            Some(delta) => {
                let accepted = self.scroll.push_delta(delta);
                self.free_scrolled |= accepted;
                InputOutcome::FreeScroll { accepted }
            }
            None => InputOutcome::Dropped,
        }
    }

    /// Jump to section `index` as if the user navigated there.
    pub fn go_to_section(&mut self, index: usize) -> NavOutcome {
        self.navigator.go_to(index, &mut self.scroll)
    }

    /// Activation of `target` (pointer click or keyboard). Returns `true` when something
    /// reacted.
    pub fn click(&mut self, target: &TargetId, sink: &mut dyn StyleSink) -> bool {
        if let Some(preloader) = &mut self.scene.preloader
            && preloader.click(target)
        {
            return true;
        }
        let Some(menu) = &mut self.scene.menu else {
            return false;
        };
        match menu.click(target, &mut self.scene.tweens, sink) {
            Some(MenuAction::Opened) => {
                tracing::debug!("menu opened");
                true
            }
            Some(MenuAction::Closed) => {
                tracing::debug!("menu closed");
                true
            }
            None => false,
        }
    }

    /// Layout changed: re-measure sections, extent, zones and triggers.
    pub fn resize(&mut self, geo: &dyn GeometryProvider) {
        let offsets: Vec<f64> = self
            .section_targets
            .iter()
            .zip(self.navigator.sections().as_slice())
            .map(|(target, section)| geo.element_offset(target).unwrap_or(section.dom_offset))
            .collect();
        self.navigator.recompute_offsets(&offsets);
        self.scroll.set_extent(geo.document_extent());

        if let Some((index, id)) = self.navigator.pending_jump() {
            if let Some(offset) = self.navigator.sections().get(index).map(|s| s.dom_offset) {
                self.scroll.retarget(id, offset);
            }
        } else if self.cfg.navigation.mode == NavigationMode::Snap && !self.scroll.is_scrolling_to() {
            let offset = self.navigator.current_offset();
            if (self.scroll.position() - offset).abs() > self.cfg.scroll.snap_epsilon {
                tracing::debug!(from = self.scroll.position(), to = offset, "re-snapping to current section");
                self.scroll.jump_to(offset);
            }
        }

        self.scene.invalidate(geo);
        self.force_publish = true;
        tracing::debug!(extent = geo.document_extent(), "layout recomputed");
    }

    /// Run one frame at `now_ms`.
    pub fn frame(
        &mut self,
        now_ms: f64,
        geo: &dyn GeometryProvider,
        sink: &mut dyn StyleSink,
    ) -> FrameReport {
        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| ((now_ms - last) / 1000.0).max(0.0));
        self.last_frame_ms = Some(now_ms);

        let mut stages_started = Vec::new();
        let preloader_finished = self
            .scene
            .preloader
            .as_mut()
            .is_some_and(|p| p.advance(dt, sink));
        if preloader_finished && self.sequencer.release(StageName::Preloader) {
            stages_started = self.run_stages(geo, sink);
        }

        let tick = self.scroll.tick(dt);
        for id in &tick.finished {
            self.navigator.on_scroll_finished(*id);
        }
        for id in &tick.cancelled {
            self.navigator.on_scroll_cancelled(*id, self.scroll.position());
        }
        self.navigator.poll(now_ms);

        let position = self.scroll.position();
        let moving = tick.changed.is_some();
        match self.cfg.navigation.mode {
            NavigationMode::Free if moving => self.navigator.sync_to_position(position),
            _ if !moving && self.free_scrolled => {
                self.free_scrolled = false;
                self.navigator.sync_to_position(position);
            }
            _ => {}
        }
        if moving {
            self.settle_at_ms = None;
        } else if self.was_moving {
            self.settle_at_ms = Some(now_ms + SLIDE_SETTLE_DELAY_MS);
        }
        if let Some(at) = self.settle_at_ms
            && now_ms >= at
        {
            self.settle_at_ms = None;
            self.settle_slides(position);
        }
        self.was_moving = moving;

        let mut zone_updates = 0;
        let mut crossings = 0;
        if moving || self.force_publish {
            self.force_publish = false;
            if moving {
                sink.apply(&TargetId::new(DOCUMENT), StyleProp::ScrollTop, StyleValue::Number(position));
            }
            zone_updates = self.scene.publish(position, geo, sink);
            crossings = self.scene.evaluate_triggers(position, &self.cfg, geo, sink);
        }
        let tween_events = self.scene.advance_tweens(dt, sink);

        let nav = self.navigator.state();
        FrameReport {
            now_ms,
            position,
            current_section: nav.current_index,
            is_transitioning: nav.is_transitioning,
            preloader_percent: self
                .scene
                .preloader
                .as_ref()
                .filter(|p| !p.is_done())
                .map(|p| p.percent()),
            stages_started,
            zone_updates,
            crossings,
            tween_events,
        }
    }

    /// Shortly after free scrolling stops inside a snapping slider, ease onto the nearest
    /// slide.
    fn settle_slides(&mut self, position: f64) {
        if self.cfg.navigation.mode != NavigationMode::Free || self.scroll.is_scrolling_to() {
            return;
        }
        for (start, end, slides) in self.scene.snap_zones() {
            if position <= start || position >= end {
                continue;
            }
            let progress = (position - start) / (end - start);
            let target = start + snap_progress(progress, slides) * (end - start);
            if (target - position).abs() <= self.cfg.scroll.snap_epsilon {
                continue;
            }
            let opts = ScrollToOpts {
                duration_secs: SLIDE_SETTLE_SECS,
                ease: Ease::InOutQuad,
                protect: false,
            };
            if self.scroll.scroll_to(target, opts).is_some() {
                tracing::debug!(from = position, to = target, "settling onto slide");
            }
            return;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/presentation.rs"]
mod tests;
