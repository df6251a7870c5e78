use crate::foundation::error::{StageError, StageResult};

/// A top-level, document-ordered navigation unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Section {
    /// Position in document order.
    pub index: usize,
    /// Scroll offset at which the section starts.
    pub dom_offset: f64,
    /// Whether this is the current section.
    pub is_active: bool,
}

/// Ordered sections with exactly one active entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    /// Build from section offsets in document order. The first section starts active.
    pub fn from_offsets(offsets: &[f64]) -> StageResult<Self> {
        if offsets.is_empty() {
            return Err(StageError::validation("at least one section is required"));
        }
        let sections = offsets
            .iter()
            .enumerate()
            .map(|(index, &dom_offset)| Section {
                index,
                dom_offset,
                is_active: index == 0,
            })
            .collect();
        Ok(Self { sections })
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; construction requires one section.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in document order.
    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    /// Section at `index`.
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Index of the active section.
    pub fn active_index(&self) -> usize {
        self.sections
            .iter()
            .position(|s| s.is_active)
            .unwrap_or(0)
    }

    /// Make `index` the only active section. Out-of-range indexes are clamped.
    pub fn activate(&mut self, index: usize) {
        let index = index.min(self.sections.len() - 1);
        for s in &mut self.sections {
            s.is_active = s.index == index;
        }
    }

    /// Replace offsets after a layout change. Extra or missing offsets keep the old values.
    pub fn recompute(&mut self, offsets: &[f64]) {
        for (s, &off) in self.sections.iter_mut().zip(offsets) {
            s.dom_offset = off;
        }
    }

    /// Last section whose start is at or above `position + tolerance`.
    pub fn index_for_position(&self, position: f64, tolerance: f64) -> usize {
        self.sections
            .iter()
            .rev()
            .find(|s| position >= s.dom_offset - tolerance)
            .map_or(0, |s| s.index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/sections.rs"]
mod tests;
