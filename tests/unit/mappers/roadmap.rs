use super::*;

fn cfg() -> RoadmapConfig {
    RoadmapConfig {
        marker_count: 5,
        track_width: 3000.0,
        viewport_width: 1000.0,
    }
}

#[test]
fn marker_two_of_five_reveals_at_forty_percent() {
    assert!(!map_roadmap(0.39, &cfg()).markers[2]);
    assert!(map_roadmap(0.4, &cfg()).markers[2]);
}

#[test]
fn reveals_are_a_step_function() {
    let s = map_roadmap(0.61, &cfg());
    assert_eq!(s.markers, vec![true, true, true, true, false]);
    let s = map_roadmap(0.0, &cfg());
    assert_eq!(s.markers, vec![true, false, false, false, false]);
    let s = map_roadmap(1.0, &cfg());
    assert!(s.markers.iter().all(|&m| m));
}

#[test]
fn track_and_fill_follow_progress() {
    let s = map_roadmap(0.25, &cfg());
    assert_eq!(s.offset_px, -500.0);
    assert_eq!(s.fill_percent, 25.0);
}

#[test]
fn marker_set_reports_only_flips() {
    let mut set = MarkerSet::new(5);
    assert_eq!(set.diff(&map_roadmap(0.0, &cfg()).markers), vec![(0, true)]);
    assert!(set.diff(&map_roadmap(0.1, &cfg()).markers).is_empty());
    assert_eq!(
        set.diff(&map_roadmap(0.45, &cfg()).markers),
        vec![(1, true), (2, true)]
    );
    assert_eq!(set.diff(&map_roadmap(0.3, &cfg()).markers), vec![(2, false)]);
    assert_eq!(set.revealed(), &[true, true, false, false, false]);
}
