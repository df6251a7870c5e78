use crate::{
    animation::ease::Ease,
    animation::style::{StyleProp, StyleSink, StyleValue},
    animation::timeline::{Segment, Timeline, TimelineEvent},
    foundation::config::PreloaderConfig,
    foundation::core::TargetId,
    stages::manifest::PreloaderTargets,
};

const LOAD: usize = 0;
const EXIT: usize = 1;
const CURTAIN: usize = 2;

/// Element carrying the page-wide `loading` class.
pub const BODY: &str = "body";

/// Load-progress preloader: counts 0 -> 100 %, fades its content, wipes the curtain and
/// then signals completion exactly once.
#[derive(Clone, Debug)]
pub struct Preloader {
    targets: PreloaderTargets,
    timeline: Timeline,
    speedup_clicks: u32,
    speedup_factor: f64,
    speedup_ramp_secs: f64,
    clicks: u32,
    sped_up: bool,
    percent: u32,
    done: bool,
}

impl Preloader {
    /// Build the preloader timeline.
    pub fn new(targets: PreloaderTargets, cfg: &PreloaderConfig) -> Self {
        let timeline = Timeline::new(vec![
            Segment::new("load", cfg.load_duration_secs, Ease::InOutQuart),
            Segment::new("exit", cfg.exit_duration_secs, Ease::InQuad),
            Segment::new("curtain", cfg.curtain_duration_secs, Ease::InOutQuart),
        ]);
        Self {
            targets,
            timeline,
            speedup_clicks: cfg.speedup_clicks,
            speedup_factor: cfg.speedup_factor,
            speedup_ramp_secs: cfg.speedup_ramp_secs,
            clicks: 0,
            sped_up: false,
            percent: 0,
            done: false,
        }
    }

    /// Last percentage written.
    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Whether completion has been signalled.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Current playback rate.
    pub fn time_scale(&self) -> f64 {
        self.timeline.time_scale()
    }

    /// Write the initial state.
    pub fn start(&self, sink: &mut dyn StyleSink) {
        sink.apply(
            &TargetId::new(BODY),
            StyleProp::Class("loading".to_owned()),
            StyleValue::Flag(true),
        );
        self.write_percent(sink);
    }

    /// Register an activation of `target`. Returns `true` when it started the speed-up.
    pub fn click(&mut self, target: &TargetId) -> bool {
        if self.done || self.sped_up || target != &self.targets.hotspot {
            return false;
        }
        self.clicks += 1;
        if self.clicks < self.speedup_clicks {
            return false;
        }
        self.sped_up = true;
        self.timeline
            .ramp_time_scale(self.speedup_factor, self.speedup_ramp_secs);
        tracing::debug!(factor = self.speedup_factor, "preloader sped up");
        true
    }

    /// Advance by `dt` seconds. Returns `true` on the call that completes the preloader.
    pub fn advance(&mut self, dt: f64, sink: &mut dyn StyleSink) -> bool {
        if self.done {
            return false;
        }

        for event in self.timeline.advance(dt) {
            match event {
                TimelineEvent::SegmentProgress { index, eased, .. } => match index {
                    LOAD => {
                        // Percent never moves backwards, even for overshooting eases.
                        let next = ((eased * 100.0).round().clamp(0.0, 100.0)) as u32;
                        if next > self.percent {
                            self.percent = next;
                            self.write_percent(sink);
                        }
                    }
                    EXIT => {
                        sink.apply(
                            &self.targets.content,
                            StyleProp::Opacity,
                            StyleValue::Number(1.0 - eased),
                        );
                        sink.apply(
                            &self.targets.content,
                            StyleProp::Scale,
                            StyleValue::Number(1.0 - 0.1 * eased),
                        );
                    }
                    CURTAIN => sink.apply(
                        &self.targets.curtain,
                        StyleProp::ClipReveal,
                        StyleValue::Number(1.0 - eased),
                    ),
                    _ => {}
                },
                TimelineEvent::SegmentComplete { index } if index == LOAD && self.percent < 100 => {
                    self.percent = 100;
                    self.write_percent(sink);
                }
                TimelineEvent::SegmentComplete { .. } => {}
                TimelineEvent::Finished => {
                    self.done = true;
                    sink.apply(
                        &TargetId::new(BODY),
                        StyleProp::Class("loading".to_owned()),
                        StyleValue::Flag(false),
                    );
                    tracing::info!("preloader finished");
                    return true;
                }
            }
        }
        false
    }

    fn write_percent(&self, sink: &mut dyn StyleSink) {
        sink.apply(
            &self.targets.percent_text,
            StyleProp::Text,
            StyleValue::Text(format!("{}%", self.percent)),
        );
        sink.apply(
            &self.targets.bar,
            StyleProp::WidthPercent,
            StyleValue::Number(f64::from(self.percent)),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stages/preloader.rs"]
mod tests;
