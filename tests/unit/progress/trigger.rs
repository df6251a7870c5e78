use super::*;
use crate::foundation::core::Viewport;
use crate::progress::geometry::StaticLayout;

fn layout() -> StaticLayout {
    StaticLayout::new(
        Viewport {
            width: 1000.0,
            height: 1000.0,
        },
        5000.0,
    )
    .with_element(".counter", 2000.0, 0.0)
}

fn counter_point() -> TriggerPoint {
    TriggerPoint::Element {
        target: TargetId::new(".counter"),
        viewport_fraction: 0.85,
    }
}

#[test]
fn element_point_subtracts_viewport_fraction() {
    let geo = layout();
    assert_eq!(counter_point().resolve(&geo).unwrap(), 1150.0);
    assert_eq!(TriggerPoint::DocumentEnd.resolve(&geo).unwrap(), 4000.0);
}

#[test]
fn once_fires_a_single_enter() {
    let geo = layout();
    let mut t = ThresholdTrigger::new(counter_point(), TriggerMode::Once, &geo).unwrap();
    assert_eq!(t.update(0.0, &geo), None);
    assert_eq!(t.update(1200.0, &geo), Some(Crossing::Enter));
    assert_eq!(t.update(1300.0, &geo), None);
    assert_eq!(t.update(0.0, &geo), None);
    assert_eq!(t.update(1200.0, &geo), None);
    t.reset();
    assert_eq!(t.update(1200.0, &geo), Some(Crossing::Enter));
}

#[test]
fn toggle_fires_both_directions() {
    let geo = layout();
    let mut t = ThresholdTrigger::new(TriggerPoint::DocumentEnd, TriggerMode::Toggle, &geo).unwrap();
    assert!(!t.is_inside());
    assert_eq!(t.update(4000.0, &geo), Some(Crossing::Enter));
    assert!(t.is_inside());
    assert_eq!(t.update(3999.0, &geo), Some(Crossing::LeaveBack));
    assert!(!t.is_inside());
    assert_eq!(t.update(4000.0, &geo), Some(Crossing::Enter));
}

#[test]
fn missing_element_fails_construction() {
    let geo = StaticLayout::default();
    assert!(ThresholdTrigger::new(counter_point(), TriggerMode::Once, &geo).is_err());
}

#[test]
fn invalidated_offset_is_recomputed_on_next_update() {
    let mut geo = layout();
    let mut t = ThresholdTrigger::new(counter_point(), TriggerMode::Toggle, &geo).unwrap();
    geo.set_element(TargetId::new(".counter"), 3000.0, 0.0);
    t.invalidate();
    assert_eq!(t.update(1200.0, &geo), None);
    assert_eq!(t.offset(), 2150.0);
}
