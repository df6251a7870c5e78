//! Tuning constants for the engine.
//!
//! Every threshold, window and duration the engine uses is presentation tuning, so all of
//! them live here with the defaults the page shipped with.

use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::error::{StageError, StageResult};

/// Root configuration object.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smooth-scroll emulation.
    pub scroll: ScrollConfig,
    /// Discrete section navigation.
    pub navigation: NavigationConfig,
    /// Load-progress preloader.
    pub preloader: PreloaderConfig,
    /// One-shot numeric counters.
    pub counter: CounterConfig,
}

/// Smooth-scroll emulator tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Approximate time for free scrolling to settle on its target.
    pub duration_secs: f64,
    /// Multiplier applied to every raw delta.
    pub sensitivity: f64,
    /// Distance under which the position snaps onto the target.
    pub snap_epsilon: f64,
    /// Delta produced by a key command when keys scroll freely.
    pub key_step: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            sensitivity: 1.0,
            snap_epsilon: 0.5,
            key_step: 100.0,
        }
    }
}

/// How raw input reaches the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Input is captured by the section navigator and the page snaps between sections.
    #[default]
    Snap,
    /// Input scrolls the page continuously; the current section follows the position.
    Free,
}

/// Section navigator tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Input routing mode.
    pub mode: NavigationMode,
    /// Accumulated wheel delta needed for one jump.
    pub wheel_threshold: f64,
    /// Idle window after which accumulated wheel delta is dropped.
    pub debounce_ms: f64,
    /// Absolute drag distance needed for a touch gesture to jump.
    pub touch_threshold: f64,
    /// Duration of the scroll-to issued by a jump.
    pub jump_duration_secs: f64,
    /// Easing of the scroll-to issued by a jump.
    pub jump_ease: Ease,
    /// Slack used when discretizing a position into a section on load.
    pub initial_tolerance: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::Snap,
            wheel_threshold: 120.0,
            debounce_ms: 200.0,
            touch_threshold: 50.0,
            jump_duration_secs: 1.2,
            jump_ease: Ease::InOutQuad,
            initial_tolerance: 100.0,
        }
    }
}

/// Preloader timeline tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    /// Duration of the 0 -> 100 % load segment.
    pub load_duration_secs: f64,
    /// Duration of the content fade-out segment.
    pub exit_duration_secs: f64,
    /// Duration of the curtain wipe segment.
    pub curtain_duration_secs: f64,
    /// Hotspot activations that trigger the speed-up.
    pub speedup_clicks: u32,
    /// Time scale reached by the speed-up.
    pub speedup_factor: f64,
    /// Time taken to ramp into the speed-up.
    pub speedup_ramp_secs: f64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            load_duration_secs: 2.8,
            exit_duration_secs: 0.4,
            curtain_duration_secs: 1.2,
            speedup_clicks: 3,
            speedup_factor: 2.0,
            speedup_ramp_secs: 0.5,
        }
    }
}

/// Counter tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Duration of the count-up.
    pub duration_secs: f64,
    /// Easing of the count-up.
    pub ease: Ease,
    /// Viewport fraction the counter's top must reach to trigger.
    pub trigger_fraction: f64,
    /// Values at or above this are formatted as money in millions.
    pub money_threshold: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_secs: 2.5,
            ease: Ease::OutQuad,
            trigger_fraction: 0.85,
            money_threshold: 1_000_000,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(s: &str) -> StageResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| StageError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> StageResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StageError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values that would stall or divide by zero.
    pub fn validate(&self) -> StageResult<()> {
        fn positive(name: &str, v: f64) -> StageResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(StageError::validation(format!("{name} must be > 0")))
            }
        }

        positive("scroll.duration_secs", self.scroll.duration_secs)?;
        positive("scroll.sensitivity", self.scroll.sensitivity)?;
        positive("scroll.snap_epsilon", self.scroll.snap_epsilon)?;
        positive("navigation.wheel_threshold", self.navigation.wheel_threshold)?;
        positive("navigation.debounce_ms", self.navigation.debounce_ms)?;
        positive("navigation.touch_threshold", self.navigation.touch_threshold)?;
        positive(
            "navigation.jump_duration_secs",
            self.navigation.jump_duration_secs,
        )?;
        positive(
            "preloader.load_duration_secs",
            self.preloader.load_duration_secs,
        )?;
        positive(
            "preloader.exit_duration_secs",
            self.preloader.exit_duration_secs,
        )?;
        positive(
            "preloader.curtain_duration_secs",
            self.preloader.curtain_duration_secs,
        )?;
        positive("preloader.speedup_factor", self.preloader.speedup_factor)?;
        positive("counter.duration_secs", self.counter.duration_secs)?;
        if self.preloader.speedup_clicks == 0 {
            return Err(StageError::validation(
                "preloader.speedup_clicks must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.counter.trigger_fraction) {
            return Err(StageError::validation(
                "counter.trigger_fraction must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
