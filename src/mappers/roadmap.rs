use crate::foundation::core::clamp01;

/// Static configuration of a progressively revealed timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoadmapConfig {
    /// Number of milestone markers.
    pub marker_count: usize,
    /// Full scroll width of the timeline track.
    pub track_width: f64,
    /// Viewport width.
    pub viewport_width: f64,
}

/// Styled state of a roadmap at one progress value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RoadmapState {
    /// Track translation in pixels.
    pub offset_px: f64,
    /// Fill bar width in percent.
    pub fill_percent: f64,
    /// Reveal flag per marker.
    pub markers: Vec<bool>,
}

/// Progress at which marker `index` of `count` is revealed.
pub fn reveal_threshold(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 / count as f64
}

/// Map zone progress to roadmap state. Reveals are a step function of progress.
pub fn map_roadmap(progress: f64, cfg: &RoadmapConfig) -> RoadmapState {
    let p = clamp01(progress);
    RoadmapState {
        offset_px: -p * (cfg.track_width - cfg.viewport_width).max(0.0),
        fill_percent: p * 100.0,
        markers: (0..cfg.marker_count)
            .map(|i| p >= reveal_threshold(i, cfg.marker_count))
            .collect(),
    }
}

/// Remembers which markers are shown so reveal edges can start entrance animations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerSet {
    revealed: Vec<bool>,
}

impl MarkerSet {
    /// All markers hidden.
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    /// Current reveal flags.
    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    /// Store `next` and return `(index, revealed)` for every marker that flipped.
    pub fn diff(&mut self, next: &[bool]) -> Vec<(usize, bool)> {
        let mut edges = Vec::new();
        for (i, (cur, &new)) in self.revealed.iter_mut().zip(next).enumerate() {
            if *cur != new {
                *cur = new;
                edges.push((i, new));
            }
        }
        edges
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mappers/roadmap.rs"]
mod tests;
