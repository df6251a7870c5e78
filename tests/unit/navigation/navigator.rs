use super::*;

#[derive(Default)]
struct RecordingDriver {
    requests: Vec<f64>,
    refuse: bool,
    position: f64,
}

impl ScrollDriver for RecordingDriver {
    fn scroll_to(&mut self, offset: f64, _opts: ScrollToOpts) -> Option<ScrollToId> {
        if self.refuse {
            return None;
        }
        self.requests.push(offset);
        Some(ScrollToId(self.requests.len() as u64))
    }

    fn position(&self) -> f64 {
        self.position
    }
}

fn nav() -> Navigator {
    let sections = SectionList::from_offsets(&[0.0, 900.0, 1800.0, 2700.0]).unwrap();
    Navigator::new(NavigationConfig::default(), sections)
}

fn last_id(d: &RecordingDriver) -> ScrollToId {
    ScrollToId(d.requests.len() as u64)
}

#[test]
fn sub_threshold_wheel_within_window_does_not_move() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    for (i, delta) in [30.0, 40.0, 30.0].into_iter().enumerate() {
        assert_eq!(n.on_wheel(delta, i as f64 * 50.0, &mut d), NavOutcome::Accumulating);
    }
    assert_eq!(n.state().current_index, 0);
    assert!(d.requests.is_empty());
}

#[test]
fn burst_over_threshold_moves_exactly_one_section() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    assert_eq!(
        n.on_wheel(5000.0, 0.0, &mut d),
        NavOutcome::Jumping { from: 0, to: 1 }
    );
    for i in 1..20 {
        assert_eq!(n.on_wheel(5000.0, f64::from(i), &mut d), NavOutcome::Ignored);
    }
    assert_eq!(d.requests, vec![900.0]);

    assert!(n.on_scroll_finished(last_id(&d)));
    assert_eq!(n.state().current_index, 1);
    assert_eq!(n.sections().active_index(), 1);
}

#[test]
fn accumulation_crosses_threshold_in_small_steps() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    assert_eq!(n.on_wheel(60.0, 0.0, &mut d), NavOutcome::Accumulating);
    assert_eq!(
        n.on_wheel(60.0, 100.0, &mut d),
        NavOutcome::Jumping { from: 0, to: 1 }
    );
    assert_eq!(n.state().accumulated_delta, 0.0);
}

#[test]
fn debounce_window_drops_stale_delta() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    n.on_wheel(100.0, 0.0, &mut d);
    n.poll(250.0);
    assert_eq!(n.state().accumulated_delta, 0.0);
    assert_eq!(n.on_wheel(100.0, 260.0, &mut d), NavOutcome::Accumulating);

    // Without a poll in between, the next wheel event still sees the expired window.
    assert_eq!(n.on_wheel(100.0, 1000.0, &mut d), NavOutcome::Accumulating);
    assert_eq!(n.state().accumulated_delta, 100.0);
}

#[test]
fn lock_spans_exactly_jump_to_completion() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    assert!(!n.state().is_transitioning);
    assert_eq!(n.pending_jump(), None);
    n.on_key(KeyCommand::Next, &mut d);
    assert!(n.state().is_transitioning);
    assert_eq!(n.pending_jump(), Some((1, last_id(&d))));
    assert!(!n.on_scroll_finished(ScrollToId(999)));
    assert!(n.state().is_transitioning);
    assert!(n.on_scroll_finished(last_id(&d)));
    assert!(!n.state().is_transitioning);
    assert_eq!(n.pending_jump(), None);
    assert_eq!(n.current_offset(), 900.0);
}

#[test]
fn at_bound_request_stays_idle_without_scrolling() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    assert_eq!(n.on_key(KeyCommand::Previous, &mut d), NavOutcome::AtBound);
    assert_eq!(n.on_wheel(-500.0, 0.0, &mut d), NavOutcome::AtBound);
    assert!(!n.state().is_transitioning);
    assert!(d.requests.is_empty());
}

#[test]
fn keys_jump_to_first_and_last() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    assert_eq!(
        n.on_key(KeyCommand::Last, &mut d),
        NavOutcome::Jumping { from: 0, to: 3 }
    );
    n.on_scroll_finished(last_id(&d));
    assert_eq!(
        n.on_key(KeyCommand::First, &mut d),
        NavOutcome::Jumping { from: 3, to: 0 }
    );
    assert_eq!(d.requests, vec![2700.0, 0.0]);
}

#[test]
fn touch_gesture_uses_absolute_distance() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    n.on_touch_start(500.0);
    assert_eq!(n.on_touch_end(460.0, &mut d), NavOutcome::Ignored);
    n.on_touch_start(500.0);
    assert_eq!(
        n.on_touch_end(420.0, &mut d),
        NavOutcome::Jumping { from: 0, to: 1 }
    );
    n.on_scroll_finished(last_id(&d));
    n.on_touch_start(300.0);
    assert_eq!(
        n.on_touch_end(400.0, &mut d),
        NavOutcome::Jumping { from: 1, to: 0 }
    );
}

#[test]
fn refused_scroll_leaves_navigator_idle() {
    let mut n = nav();
    let mut d = RecordingDriver {
        refuse: true,
        ..RecordingDriver::default()
    };
    assert_eq!(n.on_key(KeyCommand::Next, &mut d), NavOutcome::Ignored);
    assert!(!n.state().is_transitioning);
}

#[test]
fn cancelled_jump_releases_lock_and_follows_position() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    n.on_key(KeyCommand::Last, &mut d);
    assert!(n.on_scroll_cancelled(last_id(&d), 1850.0));
    assert!(!n.state().is_transitioning);
    assert_eq!(n.state().current_index, 2);
}

#[test]
fn sync_ignored_while_transitioning() {
    let mut n = nav();
    let mut d = RecordingDriver::default();
    n.on_key(KeyCommand::Next, &mut d);
    n.sync_to_position(2700.0);
    assert_eq!(n.state().current_index, 0);
}
