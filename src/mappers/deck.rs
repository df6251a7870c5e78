use crate::{
    animation::tween::Lerp,
    foundation::core::{Vec2, clamp01},
};

/// Static configuration of a card deck cycled by scroll.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Number of cards.
    pub card_count: usize,
    /// Upward travel of an exiting card in pixels.
    pub exit_distance: f64,
    /// Rotation of a fully exited card in degrees.
    pub exit_rotation: f64,
    /// Scale of a card waiting behind the active one.
    pub rest_scale: f64,
    /// Brightness of a card waiting behind the active one.
    pub rest_brightness: f64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            card_count: 0,
            exit_distance: 120.0,
            exit_rotation: -8.0,
            rest_scale: 0.9,
            rest_brightness: 0.6,
        }
    }
}

/// Where a card is in the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPhase {
    /// Fully gone.
    Exited,
    /// Leaving during the current segment.
    Exiting,
    /// Coming forward during the current segment.
    Entering,
    /// Waiting behind the deck.
    Waiting,
}

/// Styled state of one card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CardState {
    /// Phase in the cycle.
    pub phase: CardPhase,
    /// Translation in pixels.
    pub translate: Vec2,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Scale factor.
    pub scale: f64,
    /// Brightness factor.
    pub brightness: f64,
}

/// Map zone progress to the state of every card.
///
/// Progress is split into `card_count - 1` equal segments. In segment `i` card `i` exits while
/// card `i + 1` enters; every other card is at rest, so segments never overlap.
pub fn map_deck(progress: f64, cfg: &DeckConfig) -> Vec<CardState> {
    let k = cfg.card_count;
    if k == 0 {
        return Vec::new();
    }
    let segments = k.saturating_sub(1).max(1);
    let scaled = clamp01(progress) * segments as f64;
    let seg = (scaled.floor() as usize).min(segments - 1);
    let t = if k == 1 { 0.0 } else { scaled - seg as f64 };

    let exited_at = Vec2::new(0.0, -cfg.exit_distance);
    (0..k)
        .map(|j| {
            if j < seg {
                CardState {
                    phase: CardPhase::Exited,
                    translate: exited_at,
                    rotate: cfg.exit_rotation,
                    opacity: 0.0,
                    scale: 1.0,
                    brightness: 1.0,
                }
            } else if j == seg {
                CardState {
                    phase: CardPhase::Exiting,
                    translate: <Vec2 as Lerp>::lerp(&Vec2::ZERO, &exited_at, t),
                    rotate: cfg.exit_rotation * t,
                    opacity: 1.0 - t,
                    scale: 1.0,
                    brightness: 1.0,
                }
            } else if j == seg + 1 {
                CardState {
                    phase: CardPhase::Entering,
                    translate: Vec2::ZERO,
                    rotate: 0.0,
                    opacity: 1.0,
                    scale: <f64 as Lerp>::lerp(&cfg.rest_scale, &1.0, t),
                    brightness: <f64 as Lerp>::lerp(&cfg.rest_brightness, &1.0, t),
                }
            } else {
                CardState {
                    phase: CardPhase::Waiting,
                    translate: Vec2::ZERO,
                    rotate: 0.0,
                    opacity: 1.0,
                    scale: cfg.rest_scale,
                    brightness: cfg.rest_brightness,
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/mappers/deck.rs"]
mod tests;
