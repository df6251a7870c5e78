use super::*;

fn fade(target: &str, secs: f64) -> TweenSpec {
    TweenSpec::timed(
        TargetId::new(target),
        vec![PropTrack::new(StyleProp::Opacity, 0.0, 1.0)],
        secs,
        Ease::Linear,
    )
}

fn opacity_of(ev: &TweenEvent) -> Option<f64> {
    match ev {
        TweenEvent::Update { values, .. } => values
            .iter()
            .find(|(p, _)| *p == StyleProp::Opacity)
            .map(|(_, v)| *v),
        TweenEvent::Complete { .. } => None,
    }
}

#[test]
fn free_running_tween_completes_exactly_once() {
    let mut set = TweenSet::new();
    let h = set.animate(fade(".a", 1.0));

    let ev = set.advance(0.5);
    assert_eq!(ev.len(), 1);
    assert_eq!(opacity_of(&ev[0]), Some(0.5));

    let ev = set.advance(0.75);
    assert_eq!(opacity_of(&ev[0]), Some(1.0));
    assert!(matches!(ev[1], TweenEvent::Complete { handle, .. } if handle == h));
    assert!(!set.is_active(h));

    assert!(set.advance(1.0).is_empty());
}

#[test]
fn delay_holds_updates_back() {
    let mut set = TweenSet::new();
    set.animate(fade(".a", 1.0).with_delay(0.5));
    assert!(set.advance(0.25).is_empty());
    let ev = set.advance(0.5);
    assert_eq!(opacity_of(&ev[0]), Some(0.25));
}

#[test]
fn time_scale_speeds_playback() {
    let mut set = TweenSet::new();
    let h = set.animate(fade(".a", 1.0));
    set.set_time_scale(h, 2.0);
    let ev = set.advance(0.5);
    assert!(ev.iter().any(|e| matches!(e, TweenEvent::Complete { .. })));
}

#[test]
fn cancelled_tween_never_completes() {
    let mut set = TweenSet::new();
    let h = set.animate(fade(".a", 1.0));
    set.cancel(h);
    assert!(set.advance(5.0).is_empty());
}

#[test]
fn scrubbed_tween_ignores_clock_and_follows_progress() {
    let mut set = TweenSet::new();
    let h = set.animate(TweenSpec::scrubbed(
        TargetId::new(".indicator"),
        vec![PropTrack::new(StyleProp::Scale, 1.0, 0.8)],
        Ease::Linear,
    ));
    assert!(set.advance(10.0).is_empty());

    let Some(TweenEvent::Update { values, progress, .. }) = set.scrub(h, 0.5) else {
        panic!("expected update");
    };
    assert_eq!(progress, 0.5);
    assert!((values[0].1 - 0.9).abs() < 1e-12);

    let Some(TweenEvent::Update { progress, .. }) = set.scrub(h, 3.0) else {
        panic!("expected update");
    };
    assert_eq!(progress, 1.0);
    assert!(set.is_active(h));
}

#[test]
fn scrub_rejects_free_running_tweens() {
    let mut set = TweenSet::new();
    let h = set.animate(fade(".a", 1.0));
    assert!(set.scrub(h, 0.5).is_none());
}

#[test]
fn stagger_offsets_each_copy() {
    let targets = [TargetId::new("p0"), TargetId::new("p1"), TargetId::new("p2")];
    let specs = stagger(&fade("p", 0.8).with_delay(0.3), &targets, 0.15);
    let delays: Vec<f64> = specs
        .iter()
        .map(|s| match s.driver {
            TweenDriver::Duration { delay_secs, .. } => delay_secs,
            TweenDriver::Scrub => f64::NAN,
        })
        .collect();
    assert!((delays[0] - 0.3).abs() < 1e-12);
    assert!((delays[1] - 0.45).abs() < 1e-12);
    assert!((delays[2] - 0.6).abs() < 1e-12);
    assert_eq!(specs[2].target, TargetId::new("p2"));
}

#[test]
fn vec2_lerp_is_componentwise() {
    let v = <Vec2 as Lerp>::lerp(&Vec2::new(0.0, 10.0), &Vec2::new(10.0, 0.0), 0.25);
    assert_eq!(v, Vec2::new(2.5, 7.5));
}
