use super::*;

#[test]
fn key_names_map_to_commands() {
    assert_eq!(KeyCommand::from_key_name("ArrowDown"), Some(KeyCommand::Next));
    assert_eq!(KeyCommand::from_key_name(" "), Some(KeyCommand::Next));
    assert_eq!(KeyCommand::from_key_name("PageDown"), Some(KeyCommand::Next));
    assert_eq!(KeyCommand::from_key_name("ArrowUp"), Some(KeyCommand::Previous));
    assert_eq!(KeyCommand::from_key_name("PageUp"), Some(KeyCommand::Previous));
    assert_eq!(KeyCommand::from_key_name("Home"), Some(KeyCommand::First));
    assert_eq!(KeyCommand::from_key_name("End"), Some(KeyCommand::Last));
    assert_eq!(KeyCommand::from_key_name("a"), None);
}

#[test]
fn touch_drag_becomes_inverted_deltas() {
    let mut n = InputNormalizer::new();
    assert_eq!(n.normalize(InputEvent::TouchStart { y: 500.0 }, 100.0), None);
    let d = n.normalize(InputEvent::TouchMove { y: 470.0 }, 100.0).unwrap();
    assert_eq!(d.delta_y, 30.0);
    assert_eq!(d.source, InputSource::Touch);
    let d = n.normalize(InputEvent::TouchMove { y: 480.0 }, 100.0).unwrap();
    assert_eq!(d.delta_y, -10.0);
    assert_eq!(n.normalize(InputEvent::TouchEnd { y: 480.0 }, 100.0), None);
    assert_eq!(n.normalize(InputEvent::TouchMove { y: 400.0 }, 100.0), None);
}

#[test]
fn keys_step_by_configured_amount() {
    let mut n = InputNormalizer::new();
    let d = n
        .normalize(
            InputEvent::Key {
                command: KeyCommand::Previous,
            },
            80.0,
        )
        .unwrap();
    assert_eq!(d.delta_y, -80.0);
    assert_eq!(d.source, InputSource::Key);
}

#[test]
fn events_deserialize_from_tagged_json() {
    let ev: InputEvent = serde_json::from_str(r#"{ "kind": "wheel", "delta_y": 42.0 }"#).unwrap();
    assert_eq!(ev, InputEvent::Wheel { delta_y: 42.0 });
    let ev: InputEvent =
        serde_json::from_str(r#"{ "kind": "key", "command": "last" }"#).unwrap();
    assert_eq!(
        ev,
        InputEvent::Key {
            command: KeyCommand::Last
        }
    );
}
