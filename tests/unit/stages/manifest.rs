use super::*;
use crate::progress::geometry::GeometryProvider;

#[test]
fn default_page_lists_every_stage_in_order() {
    let page = PageManifest::default_page();
    let names: Vec<StageName> = page.stages.iter().map(|s| s.name).collect();
    assert_eq!(names, StageName::ORDER.to_vec());
    page.validate().unwrap();

    let gated: Vec<StageName> = page
        .stages
        .iter()
        .filter(|s| s.completion_gated)
        .map(|s| s.name)
        .collect();
    assert_eq!(gated, vec![StageName::Preloader]);
}

#[test]
fn default_layout_has_every_required_target() {
    let page = PageManifest::default_page();
    let layout = page.layout.as_ref().unwrap();
    for section in &page.sections {
        assert!(layout.contains(section), "missing section {section}");
    }
    for stage in &page.stages {
        for binding in &stage.bindings {
            for target in binding.required_targets() {
                assert!(layout.contains(target), "{:?} misses {target}", stage.name);
            }
        }
    }
}

#[test]
fn default_layout_sections_are_increasing() {
    let page = PageManifest::default_page();
    let layout = page.layout.unwrap();
    let offsets: Vec<f64> = page
        .sections
        .iter()
        .map(|s| layout.element_offset(s).unwrap())
        .collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    assert!(layout.document_extent() >= *offsets.last().unwrap());
}

#[test]
fn json_roundtrip_keeps_the_page() {
    let page = PageManifest::default_page();
    let json = serde_json::to_string_pretty(&page).unwrap();
    let back = PageManifest::from_json_str(&json).unwrap();
    assert_eq!(back, page);
}

#[test]
fn rejects_out_of_order_stages() {
    let mut page = PageManifest::default_page();
    page.stages.swap(1, 2);
    let err = page.validate().unwrap_err();
    assert!(matches!(err, StageError::Validation(_)));

    let mut page = PageManifest::default_page();
    page.sections.clear();
    assert!(page.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PageManifest::from_json_str("{\"sections\": 3}").unwrap_err();
    assert!(matches!(err, StageError::Serde(_)));
}

#[test]
fn required_targets_cover_zone_tracks() {
    let binding = BindingSpec::Slider {
        zone: ZoneSpec {
            trigger: TargetId::new(".method-section"),
            start_fraction: 0.0,
            length: ZoneLength::ScrollWidth {
                target: TargetId::new(".method-content"),
            },
        },
        track: TargetId::new(".method-content"),
        slide_count: 4,
        layout: SliderLayout::Pixels,
        fill: None,
        dots: None,
        snap: false,
    };
    let ids: Vec<&str> = binding
        .required_targets()
        .into_iter()
        .map(TargetId::as_str)
        .collect();
    assert_eq!(ids, vec![".method-section", ".method-content", ".method-content"]);
}
