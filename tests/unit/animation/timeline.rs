use super::*;

fn three() -> Timeline {
    Timeline::new(vec![
        Segment::new("load", 2.0, Ease::Linear),
        Segment::new("exit", 0.5, Ease::Linear),
        Segment::new("curtain", 1.0, Ease::Linear),
    ])
}

fn completions(ev: &[TimelineEvent]) -> Vec<usize> {
    ev.iter()
        .filter_map(|e| match e {
            TimelineEvent::SegmentComplete { index } => Some(*index),
            _ => None,
        })
        .collect()
}

#[test]
fn segments_play_in_order_and_finish_once() {
    let mut tl = three();
    let ev = tl.advance(1.0);
    assert_eq!(
        ev,
        vec![TimelineEvent::SegmentProgress {
            index: 0,
            progress: 0.5,
            eased: 0.5
        }]
    );

    let ev = tl.advance(1.25);
    assert_eq!(completions(&ev), vec![0]);
    assert_eq!(tl.current_segment(), 1);

    let ev = tl.advance(10.0);
    assert_eq!(completions(&ev), vec![1, 2]);
    assert_eq!(ev.last(), Some(&TimelineEvent::Finished));
    assert!(tl.is_finished());
    assert!(tl.advance(1.0).is_empty());
}

#[test]
fn ramped_time_scale_reaches_target() {
    let mut tl = three();
    tl.ramp_time_scale(2.0, 0.5);
    tl.advance(0.25);
    assert!(tl.time_scale() > 1.0 && tl.time_scale() < 2.0);
    tl.advance(0.25);
    assert_eq!(tl.time_scale(), 2.0);
}

#[test]
fn faster_time_scale_finishes_sooner() {
    let mut normal = three();
    let mut fast = three();
    fast.ramp_time_scale(2.0, 0.0);

    let mut normal_frames = 0;
    while !normal.is_finished() {
        normal.advance(1.0 / 60.0);
        normal_frames += 1;
    }
    let mut fast_frames = 0;
    while !fast.is_finished() {
        fast.advance(1.0 / 60.0);
        fast_frames += 1;
    }
    assert!(fast_frames * 2 <= normal_frames + 2);
}

#[test]
fn empty_timeline_finishes_immediately() {
    let mut tl = Timeline::new(Vec::new());
    assert_eq!(tl.advance(0.0), vec![TimelineEvent::Finished]);
}
