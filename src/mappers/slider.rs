use crate::foundation::core::clamp01;

/// Geometry of a horizontally scrolling track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliderTrack {
    /// Flex track of equal-width slides, offset in percent of the track.
    Flex {
        /// Number of slides.
        slide_count: usize,
    },
    /// Track measured in pixels.
    Pixels {
        /// Number of slides (for the active index).
        slide_count: usize,
        /// Full scroll width of the track.
        track_width: f64,
        /// Viewport width.
        viewport_width: f64,
    },
}

impl SliderTrack {
    /// Number of slides on the track.
    pub fn slide_count(&self) -> usize {
        match *self {
            Self::Flex { slide_count } | Self::Pixels { slide_count, .. } => slide_count,
        }
    }
}

/// Track translation in the unit of its track kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum SliderOffset {
    /// Percent of the track's own width.
    Percent(f64),
    /// Pixels.
    Pixels(f64),
}

/// Styled state of a slider at one progress value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SliderState {
    /// Track translation (always `<= 0`).
    pub offset: SliderOffset,
    /// Slide the dots highlight.
    pub active_index: usize,
    /// Progress bar width in percent.
    pub fill_percent: f64,
}

/// Map zone progress to slider state.
pub fn map_slider(progress: f64, track: SliderTrack) -> SliderState {
    let p = clamp01(progress);
    let n = track.slide_count();
    let offset = match track {
        SliderTrack::Flex { slide_count } if slide_count > 0 => {
            let n = slide_count as f64;
            SliderOffset::Percent(-p * (n - 1.0) / n * 100.0)
        }
        SliderTrack::Flex { .. } => SliderOffset::Percent(0.0),
        SliderTrack::Pixels {
            track_width,
            viewport_width,
            ..
        } => SliderOffset::Pixels(-p * (track_width - viewport_width).max(0.0)),
    };
    SliderState {
        offset,
        active_index: active_index(p, n),
        fill_percent: p * 100.0,
    }
}

fn active_index(p: f64, slide_count: usize) -> usize {
    if slide_count < 2 {
        return 0;
    }
    (p * (slide_count - 1) as f64).round() as usize
}

/// Nearest resting progress, one per slide (`0, 1/(n-1), ..., 1`).
pub fn snap_progress(progress: f64, slide_count: usize) -> f64 {
    let p = clamp01(progress);
    if slide_count < 2 {
        return p;
    }
    let steps = (slide_count - 1) as f64;
    (p * steps).round() / steps
}

#[cfg(test)]
#[path = "../../tests/unit/mappers/slider.rs"]
mod tests;
