use std::collections::BTreeMap;

use crate::foundation::core::TargetId;

/// Visual property an animation writes to a target.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProp {
    /// Horizontal translation in pixels.
    TranslateX,
    /// Horizontal translation as a percentage of the element's own width.
    TranslateXPercent,
    /// Vertical translation in pixels.
    TranslateY,
    /// Uniform scale factor.
    Scale,
    /// Rotation in degrees.
    Rotate,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Width as a percentage of the parent.
    WidthPercent,
    /// Brightness filter factor.
    Brightness,
    /// Fraction of the element revealed by its clip path.
    ClipReveal,
    /// Scroll offset of a scrolling container (the viewport for the document).
    ScrollTop,
    /// Text content.
    Text,
    /// Presence of a CSS class.
    Class(String),
}

impl StyleProp {
    /// Stable string key used when the property is stored in a map.
    pub fn key(&self) -> String {
        match self {
            Self::TranslateX => "translate_x".to_owned(),
            Self::TranslateXPercent => "translate_x_percent".to_owned(),
            Self::TranslateY => "translate_y".to_owned(),
            Self::Scale => "scale".to_owned(),
            Self::Rotate => "rotate".to_owned(),
            Self::Opacity => "opacity".to_owned(),
            Self::WidthPercent => "width_percent".to_owned(),
            Self::Brightness => "brightness".to_owned(),
            Self::ClipReveal => "clip_reveal".to_owned(),
            Self::ScrollTop => "scroll_top".to_owned(),
            Self::Text => "text".to_owned(),
            Self::Class(name) => format!("class:{name}"),
        }
    }
}

/// Value written for a [`StyleProp`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Numeric property value.
    Number(f64),
    /// Text content.
    Text(String),
    /// Class presence.
    Flag(bool),
}

/// Render surface that receives computed styles.
///
/// Implementations apply values to whatever draws the page; the engine only ever writes.
pub trait StyleSink {
    /// Apply one property value to `target`.
    fn apply(&mut self, target: &TargetId, prop: StyleProp, value: StyleValue);
}

/// In-memory style sink keeping the last value written per target and property.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleTable {
    /// `target -> property key -> value`.
    pub targets: BTreeMap<TargetId, BTreeMap<String, StyleValue>>,
    /// Number of writes received, including overwrites.
    pub writes: u64,
}

impl StyleTable {
    /// Last value written for `prop` on `target`.
    pub fn get(&self, target: &TargetId, prop: &StyleProp) -> Option<&StyleValue> {
        self.targets.get(target)?.get(&prop.key())
    }

    /// Last numeric value written for `prop` on `target`.
    pub fn number(&self, target: &TargetId, prop: &StyleProp) -> Option<f64> {
        match self.get(target, prop)? {
            StyleValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Last text written to `target`.
    pub fn text(&self, target: &TargetId) -> Option<&str> {
        match self.get(target, &StyleProp::Text)? {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether `class` is currently set on `target`.
    pub fn has_class(&self, target: &TargetId, class: &str) -> bool {
        matches!(
            self.get(target, &StyleProp::Class(class.to_owned())),
            Some(StyleValue::Flag(true))
        )
    }
}

impl StyleSink for StyleTable {
    fn apply(&mut self, target: &TargetId, prop: StyleProp, value: StyleValue) {
        self.writes += 1;
        self.targets
            .entry(target.clone())
            .or_default()
            .insert(prop.key(), value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
