use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StageError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StageError::missing_target(".method-content")
            .to_string()
            .contains("missing target: .method-content")
    );
    assert!(
        StageError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        StageError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StageError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_layout_faults_are_recoverable() {
    assert!(StageError::missing_target("a").is_recoverable());
    assert!(StageError::geometry("zero width").is_recoverable());
    assert!(!StageError::validation("bad").is_recoverable());
    assert!(!StageError::serde("bad").is_recoverable());
}
