use super::*;

#[test]
fn defaults_match_shipped_tuning() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.navigation.wheel_threshold, 120.0);
    assert_eq!(cfg.navigation.debounce_ms, 200.0);
    assert_eq!(cfg.navigation.touch_threshold, 50.0);
    assert_eq!(cfg.preloader.speedup_clicks, 3);
    assert_eq!(cfg.preloader.speedup_factor, 2.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg =
        EngineConfig::from_json_str(r#"{ "navigation": { "wheel_threshold": 80.0, "mode": "free" } }"#)
            .unwrap();
    assert_eq!(cfg.navigation.wheel_threshold, 80.0);
    assert_eq!(cfg.navigation.mode, NavigationMode::Free);
    assert_eq!(cfg.navigation.debounce_ms, 200.0);
    assert_eq!(cfg.scroll, ScrollConfig::default());
}

#[test]
fn validate_rejects_zero_threshold() {
    let err = EngineConfig::from_json_str(r#"{ "navigation": { "wheel_threshold": 0.0 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("wheel_threshold"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EngineConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, StageError::Serde(_)));
}

#[test]
fn counter_ease_is_configurable() {
    assert_eq!(EngineConfig::default().counter.ease, Ease::OutQuad);
    let cfg = EngineConfig::from_json_str(r#"{ "counter": { "ease": "linear" } }"#).unwrap();
    assert_eq!(cfg.counter.ease, Ease::Linear);
    assert_eq!(cfg.counter.duration_secs, 2.5);
}
