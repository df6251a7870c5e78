//! Declarative description of the page: sections, stages and their bindings.

use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::style::StyleProp,
    animation::tween::PropTrack,
    foundation::core::{TargetId, Viewport},
    foundation::error::{StageError, StageResult},
    mappers::deck::DeckConfig,
    progress::geometry::StaticLayout,
    progress::trigger::TriggerPoint,
    progress::zone::{ZoneLength, ZoneSpec},
};

/// Named stage of the page, in the only order stages may run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    /// Load progress and curtain.
    Preloader,
    /// Headline entrance and scroll indicator.
    Hero,
    /// Copy reveals and counters.
    About,
    /// Case studies slider.
    Cases,
    /// Method slider with progress bar and dots.
    Method,
    /// Roadmap timeline with markers.
    Roadmap,
    /// Squad card deck.
    Squad,
    /// Assistant chat reveal.
    Assistant,
    /// Pricing rows.
    Pricing,
    /// Footer reveal and easter egg.
    Footer,
    /// Fullscreen menu.
    Menu,
}

impl StageName {
    /// All stages in run order.
    pub const ORDER: [StageName; 11] = [
        Self::Preloader,
        Self::Hero,
        Self::About,
        Self::Cases,
        Self::Method,
        Self::Roadmap,
        Self::Squad,
        Self::Assistant,
        Self::Pricing,
        Self::Footer,
        Self::Menu,
    ];
}

/// Unit used to translate a slider track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderLayout {
    /// Percent of the track (equal-width flex slides).
    Flex,
    /// Pixels, from the track's measured scroll width.
    Pixels,
}

/// Page elements driven by the preloader.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreloaderTargets {
    /// Percentage text.
    pub percent_text: TargetId,
    /// Progress bar.
    pub bar: TargetId,
    /// Loader content faded out on exit.
    pub content: TargetId,
    /// Curtain wiped away at the end.
    pub curtain: TargetId,
    /// Element whose repeated activation speeds the preloader up.
    pub hotspot: TargetId,
}

/// One animation registration performed by a stage setup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingSpec {
    /// Load-progress preloader.
    Preloader(PreloaderTargets),
    /// Horizontal slider driven by a pin zone.
    Slider {
        /// Pin zone.
        zone: ZoneSpec,
        /// Moving track.
        track: TargetId,
        /// Number of slides.
        slide_count: usize,
        /// Offset unit.
        layout: SliderLayout,
        /// Optional progress bar.
        #[serde(default)]
        fill: Option<TargetId>,
        /// Optional dot base id (`dots[i]` gets the `active` class).
        #[serde(default)]
        dots: Option<TargetId>,
        /// Settle onto the nearest slide after free scrolling stops.
        #[serde(default)]
        snap: bool,
    },
    /// Roadmap timeline driven by a pin zone.
    Roadmap {
        /// Pin zone.
        zone: ZoneSpec,
        /// Moving track.
        track: TargetId,
        /// Optional fill bar.
        #[serde(default)]
        fill: Option<TargetId>,
        /// Marker base id (`marker[i]`).
        marker: TargetId,
        /// Number of markers.
        marker_count: usize,
    },
    /// Card deck driven by a pin zone.
    Deck {
        /// Pin zone.
        zone: ZoneSpec,
        /// Card base id (`card[i]`).
        card: TargetId,
        /// Deck configuration.
        config: DeckConfig,
    },
    /// Property endpoints scrubbed by a pin zone.
    Scrub {
        /// Pin zone.
        zone: ZoneSpec,
        /// Animated element.
        target: TargetId,
        /// Animated properties.
        tracks: Vec<PropTrack>,
        /// Easing of the scrub.
        #[serde(default = "linear")]
        ease: Ease,
    },
    /// One-shot count-up.
    Counter {
        /// Element showing the number.
        target: TargetId,
        /// Final value.
        value: u64,
    },
    /// One-shot entrance animation, optionally staggered over several targets.
    Reveal {
        /// Scroll trigger; `None` plays as soon as the stage is set up.
        #[serde(default)]
        trigger: Option<TriggerPoint>,
        /// Animated elements.
        targets: Vec<TargetId>,
        /// Animated properties (`from` is applied at setup).
        tracks: Vec<PropTrack>,
        /// Per-target duration.
        duration_secs: f64,
        /// Easing.
        ease: Ease,
        /// Extra delay per successive target.
        #[serde(default)]
        stagger_secs: f64,
        /// Delay before the first target.
        #[serde(default)]
        delay_secs: f64,
    },
    /// Class toggled while the scroll position is past a point.
    Toggle {
        /// Scroll trigger.
        trigger: TriggerPoint,
        /// Element receiving the class.
        target: TargetId,
        /// Class name.
        class: String,
    },
    /// Fullscreen menu.
    Menu {
        /// Element that opens the menu.
        open: TargetId,
        /// Menu container.
        menu: TargetId,
        /// Close button.
        close: TargetId,
        /// Menu links (revealed with a stagger, close the menu when activated).
        links: Vec<TargetId>,
    },
}

fn linear() -> Ease {
    Ease::Linear
}

impl BindingSpec {
    /// Elements that must be on the page for the binding to register.
    pub fn required_targets(&self) -> Vec<&TargetId> {
        fn zone_targets(zone: &ZoneSpec) -> Vec<&TargetId> {
            let mut out = vec![&zone.trigger];
            match &zone.length {
                ZoneLength::Fixed { .. } => {}
                ZoneLength::ScrollWidth { target } | ZoneLength::TrackOverflow { target } => {
                    out.push(target)
                }
            }
            out
        }
        fn point_targets(point: &TriggerPoint) -> Vec<&TargetId> {
            match point {
                TriggerPoint::Element { target, .. } => vec![target],
                TriggerPoint::DocumentEnd => Vec::new(),
            }
        }

        match self {
            Self::Preloader(t) => vec![&t.percent_text, &t.bar, &t.content, &t.curtain],
            Self::Slider { zone, track, .. } => {
                let mut out = zone_targets(zone);
                out.push(track);
                out
            }
            Self::Roadmap { zone, track, .. } => {
                let mut out = zone_targets(zone);
                out.push(track);
                out
            }
            Self::Deck { zone, .. } => zone_targets(zone),
            Self::Scrub { zone, target, .. } => {
                let mut out = zone_targets(zone);
                out.push(target);
                out
            }
            Self::Counter { target, .. } => vec![target],
            Self::Reveal {
                trigger, targets, ..
            } => {
                let mut out: Vec<&TargetId> = targets.iter().collect();
                if let Some(point) = trigger {
                    out.extend(point_targets(point));
                }
                out
            }
            Self::Toggle {
                trigger, target, ..
            } => {
                let mut out = point_targets(trigger);
                out.push(target);
                out
            }
            Self::Menu { open, menu, .. } => vec![open, menu],
        }
    }
}

/// One stage: a name, its bindings, and whether the sequencer waits for its completion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageSpec {
    /// Stage name.
    pub name: StageName,
    /// Later stages wait until this stage signals completion.
    #[serde(default)]
    pub completion_gated: bool,
    /// Registrations performed at setup.
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
}

/// Page description loaded by the engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageManifest {
    /// Navigable sections in document order.
    pub sections: Vec<TargetId>,
    /// Stages in run order.
    pub stages: Vec<StageSpec>,
    /// Geometry used when no live layout is available (CLI, tests).
    #[serde(default)]
    pub layout: Option<StaticLayout>,
}

impl PageManifest {
    /// Parse a manifest from JSON text and validate it.
    pub fn from_json_str(s: &str) -> StageResult<Self> {
        let manifest: Self =
            serde_json::from_str(s).map_err(|e| StageError::serde(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a JSON manifest file.
    pub fn from_path(path: &Path) -> StageResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StageError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json_str(&text)
    }

    /// Check section presence and stage ordering.
    pub fn validate(&self) -> StageResult<()> {
        if self.sections.is_empty() {
            return Err(StageError::validation("manifest needs at least one section"));
        }
        if !self.stages.windows(2).all(|w| w[0].name < w[1].name) {
            return Err(StageError::validation(
                "stages must be unique and listed in page order",
            ));
        }
        for stage in &self.stages {
            for binding in &stage.bindings {
                if let BindingSpec::Reveal { duration_secs, .. } = binding
                    && !(duration_secs.is_finite() && *duration_secs > 0.0)
                {
                    return Err(StageError::validation(format!(
                        "{:?}: reveal duration must be > 0",
                        stage.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Stage by name.
    pub fn stage(&self, name: StageName) -> Option<&StageSpec> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// The built-in eleven-stage page with a matching static layout.
    pub fn default_page() -> Self {
        let sections = [
            ".hero",
            ".about-section",
            ".cases-section",
            ".method-section",
            ".roadmap-section",
            ".squad-section",
            ".iara-section",
            ".pricing-section",
            "footer",
        ]
        .into_iter()
        .map(TargetId::from)
        .collect();

        Self {
            sections,
            stages: default_stages(),
            layout: Some(default_layout()),
        }
    }
}

fn t(id: &str) -> TargetId {
    TargetId::from(id)
}

fn nth_all(base: &str, count: usize) -> Vec<TargetId> {
    (0..count).map(|i| t(base).nth(i)).collect()
}

fn at(target: &str, viewport_fraction: f64) -> Option<TriggerPoint> {
    Some(TriggerPoint::Element {
        target: t(target),
        viewport_fraction,
    })
}

fn rise(from_y: f64) -> Vec<PropTrack> {
    vec![
        PropTrack::new(StyleProp::TranslateY, from_y, 0.0),
        PropTrack::new(StyleProp::Opacity, 0.0, 1.0),
    ]
}

fn pinned(trigger: &str, length: ZoneLength) -> ZoneSpec {
    ZoneSpec {
        trigger: t(trigger),
        start_fraction: 0.0,
        length,
    }
}

fn default_stages() -> Vec<StageSpec> {
    use BindingSpec as B;

    let stage = |name, bindings| StageSpec {
        name,
        completion_gated: false,
        bindings,
    };

    vec![
        StageSpec {
            name: StageName::Preloader,
            completion_gated: true,
            bindings: vec![B::Preloader(PreloaderTargets {
                percent_text: t(".loader-percentage"),
                bar: t(".loader-progress-bar"),
                content: t(".loader-content"),
                curtain: t(".loader"),
                hotspot: t(".loader-logo"),
            })],
        },
        stage(
            StageName::Hero,
            vec![
                B::Reveal {
                    trigger: None,
                    targets: vec![t(".hero-headline")],
                    tracks: rise(100.0),
                    duration_secs: 1.0,
                    ease: Ease::OutQuart,
                    stagger_secs: 0.0,
                    delay_secs: 0.2,
                },
                B::Reveal {
                    trigger: None,
                    targets: vec![t(".reveal-block")],
                    tracks: vec![PropTrack::new(StyleProp::TranslateXPercent, 0.0, 105.0)],
                    duration_secs: 0.8,
                    ease: Ease::InOutCubic,
                    stagger_secs: 0.0,
                    delay_secs: 0.5,
                },
                B::Scrub {
                    zone: pinned(".hero", ZoneLength::Fixed { px: 100.0 }),
                    target: t(".scroll-indicator"),
                    tracks: vec![
                        PropTrack::new(StyleProp::Opacity, 1.0, 0.0),
                        PropTrack::new(StyleProp::Scale, 1.0, 0.8),
                    ],
                    ease: Ease::Linear,
                },
                B::Scrub {
                    zone: pinned(".hero", ZoneLength::Fixed { px: 900.0 }),
                    target: t(".hero-bg-orb"),
                    tracks: vec![
                        PropTrack::new(StyleProp::TranslateY, 0.0, -200.0),
                        PropTrack::new(StyleProp::Scale, 1.0, 1.5),
                    ],
                    ease: Ease::Linear,
                },
            ],
        ),
        stage(
            StageName::About,
            vec![
                B::Reveal {
                    trigger: at(".about-section", 0.7),
                    targets: vec![t(".section-title")],
                    tracks: rise(100.0),
                    duration_secs: 1.0,
                    ease: Ease::OutQuart,
                    stagger_secs: 0.0,
                    delay_secs: 0.0,
                },
                B::Reveal {
                    trigger: at(".about-section", 0.6),
                    targets: nth_all(".about-text p", 3),
                    tracks: rise(40.0),
                    duration_secs: 0.8,
                    ease: Ease::OutCubic,
                    stagger_secs: 0.15,
                    delay_secs: 0.0,
                },
                B::Reveal {
                    trigger: at(".about-divider", 0.8),
                    targets: vec![t(".about-divider")],
                    tracks: vec![PropTrack::new(StyleProp::WidthPercent, 0.0, 100.0)],
                    duration_secs: 1.2,
                    ease: Ease::InOutQuart,
                    stagger_secs: 0.0,
                    delay_secs: 0.0,
                },
                B::Counter {
                    target: t(".counter").nth(0),
                    value: 150,
                },
                B::Counter {
                    target: t(".counter").nth(1),
                    value: 2_500_000,
                },
                B::Counter {
                    target: t(".counter").nth(2),
                    value: 10_000_000,
                },
                B::Reveal {
                    trigger: at(".about-image-wrapper", 0.7),
                    targets: vec![t(".founders-image")],
                    tracks: vec![PropTrack::new(StyleProp::ClipReveal, 0.0, 1.0)],
                    duration_secs: 1.2,
                    ease: Ease::InOutQuart,
                    stagger_secs: 0.0,
                    delay_secs: 0.0,
                },
            ],
        ),
        stage(
            StageName::Cases,
            vec![B::Slider {
                zone: pinned(
                    ".cases-section",
                    ZoneLength::TrackOverflow {
                        target: t(".cases-track"),
                    },
                ),
                track: t(".cases-track"),
                slide_count: 4,
                layout: SliderLayout::Flex,
                fill: None,
                dots: None,
                snap: false,
            }],
        ),
        stage(
            StageName::Method,
            vec![B::Slider {
                zone: pinned(
                    ".method-section",
                    ZoneLength::ScrollWidth {
                        target: t(".method-content"),
                    },
                ),
                track: t(".method-content"),
                slide_count: 4,
                layout: SliderLayout::Pixels,
                fill: Some(t(".method-progress-fill")),
                dots: Some(t(".dot")),
                snap: true,
            }],
        ),
        stage(
            StageName::Roadmap,
            vec![B::Roadmap {
                zone: pinned(
                    ".roadmap-section",
                    ZoneLength::TrackOverflow {
                        target: t(".roadmap-track"),
                    },
                ),
                track: t(".roadmap-track"),
                fill: Some(t(".roadmap-fill")),
                marker: t(".roadmap-marker"),
                marker_count: 5,
            }],
        ),
        stage(
            StageName::Squad,
            vec![B::Deck {
                zone: pinned(".squad-section", ZoneLength::Fixed { px: 2700.0 }),
                card: t(".squad-card"),
                config: DeckConfig {
                    card_count: 4,
                    ..DeckConfig::default()
                },
            }],
        ),
        stage(
            StageName::Assistant,
            vec![
                B::Reveal {
                    trigger: at(".iara-section", 0.6),
                    targets: vec![t(".chat-container")],
                    tracks: rise(40.0),
                    duration_secs: 1.0,
                    ease: Ease::OutCubic,
                    stagger_secs: 0.0,
                    delay_secs: 0.0,
                },
                B::Reveal {
                    trigger: at(".chat-container", 0.6),
                    targets: nth_all(".message", 4),
                    tracks: rise(20.0),
                    duration_secs: 0.5,
                    ease: Ease::OutQuad,
                    stagger_secs: 0.8,
                    delay_secs: 0.5,
                },
                B::Reveal {
                    trigger: at(".iara-stats", 0.8),
                    targets: nth_all(".stat-card", 3),
                    tracks: rise(30.0),
                    duration_secs: 0.8,
                    ease: Ease::OutQuad,
                    stagger_secs: 0.2,
                    delay_secs: 0.0,
                },
            ],
        ),
        stage(
            StageName::Pricing,
            vec![B::Reveal {
                trigger: at(".pricing-section", 0.6),
                targets: nth_all(".price-row", 4),
                tracks: vec![
                    PropTrack::new(StyleProp::TranslateX, -30.0, 0.0),
                    PropTrack::new(StyleProp::Opacity, 0.0, 1.0),
                ],
                duration_secs: 0.6,
                ease: Ease::OutQuad,
                stagger_secs: 0.15,
                delay_secs: 0.0,
            }],
        ),
        stage(
            StageName::Footer,
            vec![
                B::Reveal {
                    trigger: at("footer", 0.9),
                    targets: vec![t(".footer-logo")],
                    tracks: rise(50.0),
                    duration_secs: 1.0,
                    ease: Ease::OutQuart,
                    stagger_secs: 0.0,
                    delay_secs: 0.0,
                },
                B::Toggle {
                    trigger: TriggerPoint::DocumentEnd,
                    target: t(".footer-easter-egg"),
                    class: "visible".to_owned(),
                },
            ],
        ),
        stage(
            StageName::Menu,
            vec![B::Menu {
                open: t(".nav-links"),
                menu: t(".fullscreen-menu"),
                close: t(".menu-close-btn"),
                links: nth_all(".menu-link", 5),
            }],
        ),
    ]
}

/// Static layout of the default page at 1440x900, with pin spacing after pinned sections.
fn default_layout() -> StaticLayout {
    const VW: f64 = 1440.0;
    const VH: f64 = 900.0;

    let mut layout = StaticLayout::new(
        Viewport {
            width: VW,
            height: VH,
        },
        0.0,
    );
    let mut top = 0.0;
    let mut place = |layout: &mut StaticLayout, section: &str, pin: f64| {
        let offset = top;
        layout.set_element(t(section), offset, VW);
        top += VH + pin;
        offset
    };

    for id in [
        ".loader",
        ".loader-content",
        ".loader-percentage",
        ".loader-progress-bar",
        ".loader-logo",
        ".nav-links",
        ".fullscreen-menu",
        ".menu-close-btn",
    ] {
        layout.set_element(t(id), 0.0, VW);
    }
    for link in nth_all(".menu-link", 5) {
        layout.set_element(link, 0.0, VW);
    }

    let hero = place(&mut layout, ".hero", 0.0);
    for id in [".hero-headline", ".reveal-block", ".scroll-indicator", ".hero-bg-orb"] {
        layout.set_element(t(id), hero + 300.0, VW);
    }

    let about = place(&mut layout, ".about-section", 0.0);
    layout.set_element(t(".section-title"), about + 120.0, VW);
    for (i, p) in nth_all(".about-text p", 3).into_iter().enumerate() {
        layout.set_element(p, about + 260.0 + 80.0 * i as f64, VW);
    }
    layout.set_element(t(".about-divider"), about + 520.0, VW);
    for c in nth_all(".counter", 3) {
        layout.set_element(c, about + 600.0, VW);
    }
    layout.set_element(t(".about-image-wrapper"), about + 200.0, VW);
    layout.set_element(t(".founders-image"), about + 200.0, VW);

    let cases_width = 4.0 * VW;
    let cases = place(&mut layout, ".cases-section", cases_width - VW);
    layout.set_element(t(".cases-track"), cases, cases_width);

    let method_width = 4.0 * VW;
    let method = place(&mut layout, ".method-section", method_width);
    layout.set_element(t(".method-content"), method, method_width);
    layout.set_element(t(".method-progress-fill"), method, VW);
    for d in nth_all(".dot", 4) {
        layout.set_element(d, method + 820.0, VW);
    }

    let roadmap_width = 3.0 * VW;
    let roadmap = place(&mut layout, ".roadmap-section", roadmap_width - VW);
    layout.set_element(t(".roadmap-track"), roadmap, roadmap_width);
    layout.set_element(t(".roadmap-fill"), roadmap, roadmap_width);
    for m in nth_all(".roadmap-marker", 5) {
        layout.set_element(m, roadmap + 450.0, VW);
    }

    let squad = place(&mut layout, ".squad-section", 2700.0);
    for c in nth_all(".squad-card", 4) {
        layout.set_element(c, squad + 150.0, VW);
    }

    let iara = place(&mut layout, ".iara-section", 0.0);
    layout.set_element(t(".chat-container"), iara + 150.0, VW);
    for m in nth_all(".message", 4) {
        layout.set_element(m, iara + 200.0, VW);
    }
    layout.set_element(t(".iara-stats"), iara + 700.0, VW);
    for c in nth_all(".stat-card", 3) {
        layout.set_element(c, iara + 700.0, VW);
    }

    let pricing = place(&mut layout, ".pricing-section", 0.0);
    for r in nth_all(".price-row", 4) {
        layout.set_element(r, pricing + 200.0, VW);
    }

    let footer = place(&mut layout, "footer", 0.0);
    layout.set_element(t(".footer-logo"), footer + 200.0, VW);
    layout.set_element(t(".footer-easter-egg"), footer + 700.0, VW);

    layout.document_height = top;
    layout
}

#[cfg(test)]
#[path = "../../tests/unit/stages/manifest.rs"]
mod tests;
