//! Live registrations created from [`BindingSpec`]s and the dispatch of progress, crossings
//! and tween values to the style sink.

use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::style::{StyleProp, StyleSink, StyleValue},
    animation::tween::{PropTrack, TweenEngine, TweenEvent, TweenHandle, TweenSet, TweenSpec, stagger},
    foundation::config::EngineConfig,
    foundation::core::TargetId,
    foundation::error::StageResult,
    mappers::counter::Counter,
    mappers::deck::{DeckConfig, map_deck},
    mappers::roadmap::{MarkerSet, RoadmapConfig, map_roadmap},
    mappers::slider::{SliderOffset, SliderTrack, map_slider},
    progress::geometry::GeometryProvider,
    progress::publisher::ProgressPublisher,
    progress::trigger::{Crossing, ThresholdTrigger, TriggerMode, TriggerPoint},
    progress::zone::ZoneId,
    stages::manifest::{BindingSpec, SliderLayout},
    stages::menu::Menu,
    stages::preloader::Preloader,
};

const MARKER_ENTRANCE_SECS: f64 = 0.6;

/// Horizontal slider bound to a pin zone.
#[derive(Clone, Debug)]
pub struct SliderBinding {
    /// Driving zone.
    pub zone: ZoneId,
    track_target: TargetId,
    layout: SliderLayout,
    slide_count: usize,
    fill: Option<TargetId>,
    dots: Option<TargetId>,
    /// Settle onto the nearest slide when free scrolling stops inside the zone.
    pub snap: bool,
    track: SliderTrack,
    last_active: Option<usize>,
}

impl SliderBinding {
    fn measure(&mut self, geo: &dyn GeometryProvider) {
        self.track = match self.layout {
            SliderLayout::Flex => SliderTrack::Flex {
                slide_count: self.slide_count,
            },
            SliderLayout::Pixels => {
                let previous = match self.track {
                    SliderTrack::Pixels { track_width, .. } => track_width,
                    SliderTrack::Flex { .. } => 0.0,
                };
                SliderTrack::Pixels {
                    slide_count: self.slide_count,
                    track_width: geo.scroll_width(&self.track_target).unwrap_or(previous),
                    viewport_width: geo.viewport().width,
                }
            }
        };
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn on_progress(&mut self, progress: f64, sink: &mut dyn StyleSink) {
        let state = map_slider(progress, self.track);
        match state.offset {
            SliderOffset::Percent(v) => {
                sink.apply(&self.track_target, StyleProp::TranslateXPercent, StyleValue::Number(v))
            }
            SliderOffset::Pixels(v) => {
                sink.apply(&self.track_target, StyleProp::TranslateX, StyleValue::Number(v))
            }
        }
        if let Some(fill) = &self.fill {
            sink.apply(fill, StyleProp::WidthPercent, StyleValue::Number(state.fill_percent));
        }
        if let Some(dots) = &self.dots
            && self.last_active != Some(state.active_index)
        {
            for i in 0..self.slide_count {
                sink.apply(
                    &dots.nth(i),
                    StyleProp::Class("active".to_owned()),
                    StyleValue::Flag(i == state.active_index),
                );
            }
        }
        self.last_active = Some(state.active_index);
    }
}

/// Roadmap track, fill and markers bound to a pin zone.
#[derive(Clone, Debug)]
pub struct RoadmapBinding {
    zone: ZoneId,
    track: TargetId,
    fill: Option<TargetId>,
    marker: TargetId,
    cfg: RoadmapConfig,
    markers: MarkerSet,
    entrances: Vec<Option<TweenHandle>>,
}

impl RoadmapBinding {
    fn measure(&mut self, geo: &dyn GeometryProvider) {
        if let Some(width) = geo.scroll_width(&self.track) {
            self.cfg.track_width = width;
        }
        self.cfg.viewport_width = geo.viewport().width;
    }

    fn hide_marker(&self, index: usize, sink: &mut dyn StyleSink) {
        let target = self.marker.nth(index);
        sink.apply(&target, StyleProp::Scale, StyleValue::Number(0.0));
        sink.apply(&target, StyleProp::Opacity, StyleValue::Number(0.0));
    }

    fn on_progress(&mut self, progress: f64, tweens: &mut TweenSet, sink: &mut dyn StyleSink) {
        let state = map_roadmap(progress, &self.cfg);
        sink.apply(&self.track, StyleProp::TranslateX, StyleValue::Number(state.offset_px));
        if let Some(fill) = &self.fill {
            sink.apply(fill, StyleProp::WidthPercent, StyleValue::Number(state.fill_percent));
        }

        for (index, revealed) in self.markers.diff(&state.markers) {
            if let Some(handle) = self.entrances[index].take() {
                tweens.cancel(handle);
            }
            if revealed {
                let spec = TweenSpec::timed(
                    self.marker.nth(index),
                    vec![
                        PropTrack::new(StyleProp::Scale, 0.0, 1.0),
                        PropTrack::new(StyleProp::Opacity, 0.0, 1.0),
                    ],
                    MARKER_ENTRANCE_SECS,
                    Ease::OutBack,
                );
                self.entrances[index] = Some(tweens.animate(spec));
            } else {
                self.hide_marker(index, sink);
            }
        }
    }
}

/// A registration that outlives stage setup.
#[derive(Clone, Debug)]
pub enum Binding {
    /// Horizontal slider.
    Slider(SliderBinding),
    /// Roadmap timeline.
    Roadmap(RoadmapBinding),
    /// Card deck.
    Deck {
        /// Driving zone.
        zone: ZoneId,
        /// Card base id.
        card: TargetId,
        /// Deck configuration.
        config: DeckConfig,
    },
    /// Scrubbed tween.
    Scrub {
        /// Driving zone.
        zone: ZoneId,
        /// Tween in the engine.
        handle: TweenHandle,
    },
    /// One-shot count-up.
    Counter {
        /// Viewport threshold.
        trigger: ThresholdTrigger,
        /// Counter state.
        counter: Counter,
        /// Running count-up.
        tween: Option<TweenHandle>,
    },
    /// One-shot entrance.
    Reveal {
        /// Viewport threshold.
        trigger: ThresholdTrigger,
        /// Tweens started on enter.
        specs: Vec<TweenSpec>,
    },
    /// Class toggle.
    Toggle {
        /// Viewport threshold.
        trigger: ThresholdTrigger,
        /// Element receiving the class.
        target: TargetId,
        /// Class name.
        class: String,
    },
}

impl Binding {
    /// Zone driving this binding, if any.
    pub fn zone(&self) -> Option<ZoneId> {
        match self {
            Self::Slider(s) => Some(s.zone),
            Self::Roadmap(r) => Some(r.zone),
            Self::Deck { zone, .. } | Self::Scrub { zone, .. } => Some(*zone),
            Self::Counter { .. } | Self::Reveal { .. } | Self::Toggle { .. } => None,
        }
    }

    fn trigger_mut(&mut self) -> Option<&mut ThresholdTrigger> {
        match self {
            Self::Counter { trigger, .. }
            | Self::Reveal { trigger, .. }
            | Self::Toggle { trigger, .. } => Some(trigger),
            _ => None,
        }
    }
}

/// Everything stage setups register into, plus the stateful stage components.
#[derive(Debug, Default)]
pub struct Scene {
    /// Pin zones.
    pub publisher: ProgressPublisher,
    /// Live bindings in registration order.
    pub bindings: Vec<Binding>,
    /// Free-running and scrubbed tweens.
    pub tweens: TweenSet,
    /// Preloader, once its stage is set up.
    pub preloader: Option<Preloader>,
    /// Menu, once its stage is set up.
    pub menu: Option<Menu>,
    zone_owner: BTreeMap<ZoneId, usize>,
}

impl Scene {
    /// Register one binding. Returns `true` when the binding started work whose
    /// completion gates later stages.
    pub fn bind(
        &mut self,
        spec: &BindingSpec,
        cfg: &EngineConfig,
        geo: &dyn GeometryProvider,
        sink: &mut dyn StyleSink,
    ) -> StageResult<bool> {
        let binding = match spec {
            BindingSpec::Preloader(targets) => {
                let preloader = Preloader::new(targets.clone(), &cfg.preloader);
                preloader.start(sink);
                self.preloader = Some(preloader);
                return Ok(true);
            }
            BindingSpec::Menu {
                open,
                menu,
                close,
                links,
            } => {
                self.menu = Some(Menu::new(open.clone(), menu.clone(), close.clone(), links.clone()));
                return Ok(false);
            }
            BindingSpec::Slider {
                zone,
                track,
                slide_count,
                layout,
                fill,
                dots,
                snap,
            } => {
                let zone = self.publisher.register(zone.clone(), geo)?;
                let mut slider = SliderBinding {
                    zone,
                    track_target: track.clone(),
                    layout: *layout,
                    slide_count: *slide_count,
                    fill: fill.clone(),
                    dots: dots.clone(),
                    snap: *snap,
                    track: SliderTrack::Flex {
                        slide_count: *slide_count,
                    },
                    last_active: None,
                };
                slider.measure(geo);
                Binding::Slider(slider)
            }
            BindingSpec::Roadmap {
                zone,
                track,
                fill,
                marker,
                marker_count,
            } => {
                let zone = self.publisher.register(zone.clone(), geo)?;
                let mut roadmap = RoadmapBinding {
                    zone,
                    track: track.clone(),
                    fill: fill.clone(),
                    marker: marker.clone(),
                    cfg: RoadmapConfig {
                        marker_count: *marker_count,
                        track_width: 0.0,
                        viewport_width: 0.0,
                    },
                    markers: MarkerSet::new(*marker_count),
                    entrances: vec![None; *marker_count],
                };
                roadmap.measure(geo);
                for i in 0..*marker_count {
                    roadmap.hide_marker(i, sink);
                }
                Binding::Roadmap(roadmap)
            }
            BindingSpec::Deck { zone, card, config } => {
                let zone = self.publisher.register(zone.clone(), geo)?;
                Binding::Deck {
                    zone,
                    card: card.clone(),
                    config: *config,
                }
            }
            BindingSpec::Scrub {
                zone,
                target,
                tracks,
                ease,
            } => {
                let zone = self.publisher.register(zone.clone(), geo)?;
                let handle = self
                    .tweens
                    .animate(TweenSpec::scrubbed(target.clone(), tracks.clone(), *ease));
                Binding::Scrub { zone, handle }
            }
            BindingSpec::Counter { target, value } => {
                let point = TriggerPoint::Element {
                    target: target.clone(),
                    viewport_fraction: cfg.counter.trigger_fraction,
                };
                let trigger = ThresholdTrigger::new(point, TriggerMode::Toggle, geo)?;
                let counter = Counter::new(target.clone(), *value, cfg.counter.money_threshold);
                sink.apply(target, StyleProp::Text, StyleValue::Text(counter.format(0.0)));
                Binding::Counter {
                    trigger,
                    counter,
                    tween: None,
                }
            }
            BindingSpec::Reveal {
                trigger,
                targets,
                tracks,
                duration_secs,
                ease,
                stagger_secs,
                delay_secs,
            } => {
                let Some(first) = targets.first() else {
                    return Ok(false);
                };
                let base = TweenSpec::timed(first.clone(), tracks.clone(), *duration_secs, *ease)
                    .with_delay(*delay_secs);
                let specs = stagger(&base, targets, *stagger_secs);
                for target in targets {
                    for track in tracks {
                        write_value(sink, target, track.prop.clone(), track.from);
                    }
                }
                match trigger {
                    None => {
                        for spec in specs {
                            self.tweens.animate(spec);
                        }
                        return Ok(false);
                    }
                    Some(point) => Binding::Reveal {
                        trigger: ThresholdTrigger::new(point.clone(), TriggerMode::Once, geo)?,
                        specs,
                    },
                }
            }
            BindingSpec::Toggle {
                trigger,
                target,
                class,
            } => Binding::Toggle {
                trigger: ThresholdTrigger::new(trigger.clone(), TriggerMode::Toggle, geo)?,
                target: target.clone(),
                class: class.clone(),
            },
        };

        if let Some(zone) = binding.zone() {
            self.zone_owner.insert(zone, self.bindings.len());
        }
        self.bindings.push(binding);
        Ok(false)
    }

    /// Recompute progress at `position` and drive every zone binding whose value changed.
    /// Returns the number of updates dispatched.
    pub fn publish(
        &mut self,
        position: f64,
        geo: &dyn GeometryProvider,
        sink: &mut dyn StyleSink,
    ) -> usize {
        let updates = self.publisher.on_scroll(position, geo);
        for update in &updates {
            let Some(&index) = self.zone_owner.get(&update.zone) else {
                continue;
            };
            match &mut self.bindings[index] {
                Binding::Slider(slider) => slider.on_progress(update.progress, sink),
                Binding::Roadmap(roadmap) => {
                    roadmap.on_progress(update.progress, &mut self.tweens, sink)
                }
                Binding::Deck { card, config, .. } => {
                    for (j, state) in map_deck(update.progress, config).iter().enumerate() {
                        let target = card.nth(j);
                        sink.apply(&target, StyleProp::TranslateX, StyleValue::Number(state.translate.x));
                        sink.apply(&target, StyleProp::TranslateY, StyleValue::Number(state.translate.y));
                        sink.apply(&target, StyleProp::Rotate, StyleValue::Number(state.rotate));
                        sink.apply(&target, StyleProp::Opacity, StyleValue::Number(state.opacity));
                        sink.apply(&target, StyleProp::Scale, StyleValue::Number(state.scale));
                        sink.apply(&target, StyleProp::Brightness, StyleValue::Number(state.brightness));
                    }
                }
                Binding::Scrub { handle, .. } => {
                    if let Some(TweenEvent::Update { target, values, .. }) =
                        self.tweens.scrub(*handle, update.progress)
                    {
                        for (prop, value) in values {
                            write_value(sink, &target, prop, value);
                        }
                    }
                }
                Binding::Counter { .. } | Binding::Reveal { .. } | Binding::Toggle { .. } => {}
            }
        }
        updates.len()
    }

    /// Evaluate every threshold trigger at `position`. Returns the number of crossings.
    pub fn evaluate_triggers(
        &mut self,
        position: f64,
        cfg: &EngineConfig,
        geo: &dyn GeometryProvider,
        sink: &mut dyn StyleSink,
    ) -> usize {
        let mut crossings = 0;
        for binding in &mut self.bindings {
            let Some(crossing) = binding.trigger_mut().and_then(|t| t.update(position, geo)) else {
                continue;
            };
            crossings += 1;
            match (binding, crossing) {
                (
                    Binding::Counter {
                        counter, tween, ..
                    },
                    Crossing::Enter,
                ) => {
                    if counter.trigger() {
                        tracing::debug!(element = %counter.target, value = counter.target_value, "counter started");
                        let spec = TweenSpec::timed(
                            counter.target.clone(),
                            vec![PropTrack::new(StyleProp::Text, 0.0, counter.target_value as f64)],
                            cfg.counter.duration_secs,
                            cfg.counter.ease,
                        );
                        *tween = Some(self.tweens.animate(spec));
                    }
                }
                (Binding::Reveal { specs, .. }, Crossing::Enter) => {
                    for spec in specs.iter() {
                        self.tweens.animate(spec.clone());
                    }
                }
                (
                    Binding::Toggle {
                        target, class, ..
                    },
                    crossing,
                ) => {
                    let on = crossing == Crossing::Enter;
                    tracing::debug!(element = %target, class = %class, on, "class toggled");
                    sink.apply(target, StyleProp::Class(class.clone()), StyleValue::Flag(on));
                }
                _ => {}
            }
        }
        crossings
    }

    /// Advance free-running tweens and write their values. Returns the number of events.
    pub fn advance_tweens(&mut self, dt: f64, sink: &mut dyn StyleSink) -> usize {
        let events = self.tweens.advance(dt);
        let count = events.len();
        for event in events {
            if let TweenEvent::Complete { handle, .. } = &event {
                for binding in &mut self.bindings {
                    if let Binding::Roadmap(roadmap) = binding {
                        for slot in &mut roadmap.entrances {
                            if *slot == Some(*handle) {
                                *slot = None;
                            }
                        }
                    }
                }
            }
            apply_event(&self.bindings, sink, event);
        }
        count
    }

    /// Mark every cached measurement stale after a layout change.
    pub fn invalidate(&mut self, geo: &dyn GeometryProvider) {
        self.publisher.invalidate_all();
        for binding in &mut self.bindings {
            match binding {
                Binding::Slider(slider) => slider.measure(geo),
                Binding::Roadmap(roadmap) => roadmap.measure(geo),
                other => {
                    if let Some(trigger) = other.trigger_mut() {
                        trigger.invalidate();
                    }
                }
            }
        }
    }

    /// Snap-enabled slider zones as `(start, end, slide_count)`.
    pub fn snap_zones(&self) -> Vec<(f64, f64, usize)> {
        self.bindings
            .iter()
            .filter_map(|b| match b {
                Binding::Slider(s) if s.snap => self
                    .publisher
                    .zone(s.zone)
                    .filter(|z| !z.is_degenerate())
                    .map(|z| (z.start_offset, z.end_offset, s.slide_count())),
                _ => None,
            })
            .collect()
    }
}

fn counter_for(bindings: &[Binding], handle: TweenHandle) -> Option<&Counter> {
    bindings.iter().find_map(|b| match b {
        Binding::Counter {
            counter,
            tween: Some(h),
            ..
        } if *h == handle => Some(counter),
        _ => None,
    })
}

fn apply_event(bindings: &[Binding], sink: &mut dyn StyleSink, event: TweenEvent) {
    match event {
        TweenEvent::Update {
            handle,
            target,
            values,
            ..
        } => {
            if let Some(counter) = counter_for(bindings, handle) {
                let value = values.first().map_or(0.0, |(_, v)| *v);
                sink.apply(&target, StyleProp::Text, StyleValue::Text(counter.format(value)));
                return;
            }
            for (prop, value) in values {
                write_value(sink, &target, prop, value);
            }
        }
        TweenEvent::Complete { handle, target } => {
            if let Some(counter) = counter_for(bindings, handle) {
                sink.apply(
                    &target,
                    StyleProp::Text,
                    StyleValue::Text(counter.format(counter.target_value as f64)),
                );
            }
        }
    }
}

fn write_value(sink: &mut dyn StyleSink, target: &TargetId, prop: StyleProp, value: f64) {
    let value = match prop {
        StyleProp::Opacity | StyleProp::ClipReveal => value.clamp(0.0, 1.0),
        _ => value,
    };
    sink.apply(target, prop, StyleValue::Number(value));
}

#[cfg(test)]
#[path = "../../tests/unit/session/binding.rs"]
mod tests;
