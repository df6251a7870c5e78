/// Kind of device a delta came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Mouse wheel or trackpad.
    Wheel,
    /// Touch drag.
    Touch,
    /// Keyboard command.
    Key,
}

/// Keyboard navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Next section.
    Next,
    /// Previous section.
    Previous,
    /// First section.
    First,
    /// Last section.
    Last,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` name to a command.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | " " | "PageDown" => Some(Self::Next),
            "ArrowUp" | "PageUp" => Some(Self::Previous),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }
}

/// Raw input as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Wheel delta; positive scrolls toward the end of the document.
    Wheel {
        /// Vertical delta in pixels.
        delta_y: f64,
    },
    /// Finger down at client `y`.
    TouchStart {
        /// Client y coordinate.
        y: f64,
    },
    /// Finger moved to client `y`.
    TouchMove {
        /// Client y coordinate.
        y: f64,
    },
    /// Finger lifted at client `y`.
    TouchEnd {
        /// Client y coordinate.
        y: f64,
    },
    /// Keyboard command.
    Key {
        /// Mapped command.
        command: KeyCommand,
    },
}

/// Source-independent scroll delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollDelta {
    /// Signed delta; positive scrolls toward the end of the document.
    pub delta_y: f64,
    /// Originating device.
    pub source: InputSource,
}

/// Turns every input kind into [`ScrollDelta`]s for free scrolling.
///
/// Touch drags become per-move deltas (finger moving up scrolls down). Key commands become
/// fixed steps, with `First`/`Last` saturating at the document bounds.
#[derive(Clone, Debug, Default)]
pub struct InputNormalizer {
    last_touch_y: Option<f64>,
}

impl InputNormalizer {
    /// Fresh normalizer with no gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one event. Gesture boundaries produce no delta.
    pub fn normalize(&mut self, event: InputEvent, key_step: f64) -> Option<ScrollDelta> {
        match event {
            InputEvent::Wheel { delta_y } => Some(ScrollDelta {
                delta_y,
                source: InputSource::Wheel,
            }),
            InputEvent::TouchStart { y } => {
                self.last_touch_y = Some(y);
                None
            }
            InputEvent::TouchMove { y } => {
                let last = self.last_touch_y.replace(y)?;
                Some(ScrollDelta {
                    delta_y: last - y,
                    source: InputSource::Touch,
                })
            }
            InputEvent::TouchEnd { .. } => {
                self.last_touch_y = None;
                None
            }
            InputEvent::Key { command } => {
                let delta_y = match command {
                    KeyCommand::Next => key_step,
                    KeyCommand::Previous => -key_step,
                    KeyCommand::First => f64::MIN,
                    KeyCommand::Last => f64::MAX,
                };
                Some(ScrollDelta {
                    delta_y,
                    source: InputSource::Key,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/input.rs"]
mod tests;
