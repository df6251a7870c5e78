use super::*;
use crate::animation::style::StyleTable;
use crate::foundation::core::Viewport;
use crate::progress::geometry::StaticLayout;
use crate::progress::zone::{ZoneLength, ZoneSpec};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn layout() -> StaticLayout {
    StaticLayout::new(
        Viewport {
            width: 1000.0,
            height: 800.0,
        },
        10_000.0,
    )
    .with_element(".method-section", 2000.0, 1000.0)
    .with_element(".method-content", 2000.0, 4000.0)
    .with_element(".counter", 3000.0, 1000.0)
    .with_element(".roadmap-section", 5000.0, 1000.0)
    .with_element(".roadmap-track", 5000.0, 3000.0)
}

fn t(id: &str) -> TargetId {
    TargetId::new(id)
}

#[test]
fn slider_maps_progress_to_track_fill_and_dots() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Slider {
        zone: ZoneSpec {
            trigger: t(".method-section"),
            start_fraction: 0.0,
            length: ZoneLength::ScrollWidth {
                target: t(".method-content"),
            },
        },
        track: t(".method-content"),
        slide_count: 4,
        layout: SliderLayout::Pixels,
        fill: Some(t(".fill")),
        dots: Some(t(".dot")),
        snap: true,
    };
    assert!(!scene.bind(&spec, &cfg, &geo, &mut sink).unwrap());
    assert_eq!(scene.snap_zones(), vec![(2000.0, 6000.0, 4)]);

    assert_eq!(scene.publish(4000.0, &geo, &mut sink), 1);
    assert_eq!(
        sink.number(&t(".method-content"), &StyleProp::TranslateX),
        Some(-1500.0)
    );
    assert_eq!(sink.number(&t(".fill"), &StyleProp::WidthPercent), Some(50.0));
    assert!(sink.has_class(&t(".dot[2]"), "active"));
    assert!(!sink.has_class(&t(".dot[1]"), "active"));

    // Same position publishes nothing.
    assert_eq!(scene.publish(4000.0, &geo, &mut sink), 0);
}

#[test]
fn counter_counts_up_once_across_crossings() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Counter {
        target: t(".counter"),
        value: 150,
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    assert_eq!(sink.text(&t(".counter")), Some("0"));

    assert_eq!(scene.evaluate_triggers(0.0, &cfg, &geo, &mut sink), 0);
    assert_eq!(scene.evaluate_triggers(2400.0, &cfg, &geo, &mut sink), 1);
    assert_eq!(scene.tweens.len(), 1);

    scene.advance_tweens(cfg.counter.duration_secs + 0.1, &mut sink);
    assert_eq!(sink.text(&t(".counter")), Some("150"));
    assert!(scene.tweens.is_empty());

    assert_eq!(scene.evaluate_triggers(0.0, &cfg, &geo, &mut sink), 1);
    assert_eq!(scene.evaluate_triggers(2400.0, &cfg, &geo, &mut sink), 1);
    assert!(scene.tweens.is_empty());
    assert_eq!(sink.text(&t(".counter")), Some("150"));
}

#[test]
fn counter_count_up_follows_configured_ease() {
    let geo = layout();
    let spec = BindingSpec::Counter {
        target: t(".counter"),
        value: 150,
    };
    let halfway = |cfg: &EngineConfig| {
        let mut sink = StyleTable::default();
        let mut scene = Scene::default();
        scene.bind(&spec, cfg, &geo, &mut sink).unwrap();
        scene.evaluate_triggers(2400.0, cfg, &geo, &mut sink);
        scene.advance_tweens(cfg.counter.duration_secs / 2.0, &mut sink);
        sink.text(&t(".counter")).map(str::to_owned)
    };

    // Quadratic ease-out is three quarters of the way at half time.
    let mut cfg = EngineConfig::default();
    assert_eq!(halfway(&cfg).as_deref(), Some("113"));

    cfg.counter.ease = Ease::Linear;
    assert_eq!(halfway(&cfg).as_deref(), Some("75"));
}

#[test]
fn money_counter_formats_intermediate_values() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Counter {
        target: t(".counter"),
        value: 2_500_000,
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    scene.evaluate_triggers(2400.0, &cfg, &geo, &mut sink);
    scene.advance_tweens(0.1, &mut sink);
    let text = sink.text(&t(".counter")).unwrap().to_owned();
    assert!(text.starts_with("R$ ") && text.ends_with("M+"), "{text}");

    scene.advance_tweens(10.0, &mut sink);
    assert_eq!(sink.text(&t(".counter")), Some("R$ 2.5M+"));
}

#[test]
fn reveal_applies_start_values_then_plays_once() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Reveal {
        trigger: Some(TriggerPoint::Element {
            target: t(".counter"),
            viewport_fraction: 0.5,
        }),
        targets: vec![t(".a"), t(".b")],
        tracks: vec![PropTrack::new(StyleProp::Opacity, 0.0, 1.0)],
        duration_secs: 1.0,
        ease: Ease::Linear,
        stagger_secs: 0.5,
        delay_secs: 0.0,
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    assert_eq!(sink.number(&t(".a"), &StyleProp::Opacity), Some(0.0));
    assert_eq!(sink.number(&t(".b"), &StyleProp::Opacity), Some(0.0));

    assert_eq!(scene.evaluate_triggers(3000.0, &cfg, &geo, &mut sink), 1);
    assert_eq!(scene.tweens.len(), 2);
    scene.advance_tweens(0.5, &mut sink);
    assert!(approx(sink.number(&t(".a"), &StyleProp::Opacity).unwrap(), 0.5));
    assert_eq!(sink.number(&t(".b"), &StyleProp::Opacity), Some(0.0));

    scene.advance_tweens(2.0, &mut sink);
    assert_eq!(sink.number(&t(".b"), &StyleProp::Opacity), Some(1.0));

    scene.evaluate_triggers(0.0, &cfg, &geo, &mut sink);
    scene.evaluate_triggers(3000.0, &cfg, &geo, &mut sink);
    assert!(scene.tweens.is_empty());
}

#[test]
fn untriggered_reveal_starts_at_setup() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Reveal {
        trigger: None,
        targets: vec![t(".headline")],
        tracks: vec![PropTrack::new(StyleProp::TranslateY, 100.0, 0.0)],
        duration_secs: 1.0,
        ease: Ease::OutQuart,
        stagger_secs: 0.0,
        delay_secs: 0.2,
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    assert!(scene.bindings.is_empty());
    assert_eq!(scene.tweens.len(), 1);
    scene.advance_tweens(2.0, &mut sink);
    assert_eq!(sink.number(&t(".headline"), &StyleProp::TranslateY), Some(0.0));
}

#[test]
fn roadmap_reveals_and_hides_markers_on_edges() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Roadmap {
        zone: ZoneSpec {
            trigger: t(".roadmap-section"),
            start_fraction: 0.0,
            length: ZoneLength::TrackOverflow {
                target: t(".roadmap-track"),
            },
        },
        track: t(".roadmap-track"),
        fill: None,
        marker: t(".m"),
        marker_count: 4,
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    assert_eq!(sink.number(&t(".m[3]"), &StyleProp::Scale), Some(0.0));

    scene.publish(5000.0, &geo, &mut sink);
    assert_eq!(scene.tweens.len(), 1);

    scene.publish(6000.0, &geo, &mut sink);
    assert_eq!(scene.tweens.len(), 3);
    assert_eq!(
        sink.number(&t(".roadmap-track"), &StyleProp::TranslateX),
        Some(-1000.0)
    );

    scene.advance_tweens(1.0, &mut sink);
    assert!(scene.tweens.is_empty());
    assert!(approx(sink.number(&t(".m[2]"), &StyleProp::Scale).unwrap(), 1.0));
    assert_eq!(sink.number(&t(".m[2]"), &StyleProp::Opacity), Some(1.0));

    scene.publish(5100.0, &geo, &mut sink);
    assert_eq!(sink.number(&t(".m[2]"), &StyleProp::Scale), Some(0.0));
    assert_eq!(sink.number(&t(".m[1]"), &StyleProp::Opacity), Some(0.0));
    assert!(approx(sink.number(&t(".m[0]"), &StyleProp::Scale).unwrap(), 1.0));
}

#[test]
fn scrub_follows_zone_progress() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Scrub {
        zone: ZoneSpec {
            trigger: t(".method-section"),
            start_fraction: 0.0,
            length: ZoneLength::Fixed { px: 100.0 },
        },
        target: t(".indicator"),
        tracks: vec![PropTrack::new(StyleProp::Opacity, 1.0, 0.0)],
        ease: Ease::Linear,
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();

    scene.publish(2050.0, &geo, &mut sink);
    assert!(approx(sink.number(&t(".indicator"), &StyleProp::Opacity).unwrap(), 0.5));
    scene.publish(0.0, &geo, &mut sink);
    assert_eq!(sink.number(&t(".indicator"), &StyleProp::Opacity), Some(1.0));
    // Scrubbed tweens are not advanced by time.
    assert_eq!(scene.advance_tweens(5.0, &mut sink), 0);
}

#[test]
fn toggle_follows_both_directions() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Toggle {
        trigger: TriggerPoint::DocumentEnd,
        target: t(".egg"),
        class: "visible".to_owned(),
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    let end = geo.document_extent();

    scene.evaluate_triggers(end, &cfg, &geo, &mut sink);
    assert!(sink.has_class(&t(".egg"), "visible"));
    scene.evaluate_triggers(end - 1.0, &cfg, &geo, &mut sink);
    assert!(!sink.has_class(&t(".egg"), "visible"));
}

#[test]
fn deck_writes_every_card() {
    let geo = layout();
    let cfg = EngineConfig::default();
    let mut sink = StyleTable::default();
    let mut scene = Scene::default();

    let spec = BindingSpec::Deck {
        zone: ZoneSpec {
            trigger: t(".method-section"),
            start_fraction: 0.0,
            length: ZoneLength::Fixed { px: 3000.0 },
        },
        card: t(".card"),
        config: DeckConfig {
            card_count: 4,
            ..DeckConfig::default()
        },
    };
    scene.bind(&spec, &cfg, &geo, &mut sink).unwrap();
    scene.publish(2500.0, &geo, &mut sink);

    // Progress 1/6: card 0 is halfway out, card 1 halfway in.
    assert!(approx(sink.number(&t(".card[0]"), &StyleProp::Opacity).unwrap(), 0.5));
    assert!(approx(sink.number(&t(".card[0]"), &StyleProp::TranslateY).unwrap(), -60.0));
    assert!(approx(sink.number(&t(".card[1]"), &StyleProp::Scale).unwrap(), 0.95));
    assert_eq!(sink.number(&t(".card[3]"), &StyleProp::Scale), Some(0.9));
}
