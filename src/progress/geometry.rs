use std::collections::BTreeMap;

use crate::foundation::core::{TargetId, Viewport};

/// Read-only layout queries against the rendered page.
///
/// Every answer may change after a resize; callers cache results only until the next
/// invalidation.
pub trait GeometryProvider {
    /// Document offset of the element's top edge, or `None` when it is not on the page.
    fn element_offset(&self, target: &TargetId) -> Option<f64>;
    /// Full scrollable width of the element's content.
    fn scroll_width(&self, target: &TargetId) -> Option<f64>;
    /// Current viewport size.
    fn viewport(&self) -> Viewport;
    /// Largest scroll offset the document allows.
    fn document_extent(&self) -> f64;

    /// Whether the element is on the page.
    fn contains(&self, target: &TargetId) -> bool {
        self.element_offset(target).is_some()
    }
}

/// Box measurements for one element of a [`StaticLayout`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBox {
    /// Document offset of the top edge.
    pub offset_top: f64,
    /// Scrollable content width.
    #[serde(default)]
    pub scroll_width: f64,
}

/// Geometry described up front, used by the CLI and in tests.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    /// Viewport size.
    #[serde(default)]
    pub viewport: Viewport,
    /// Total document height.
    pub document_height: f64,
    /// Known elements.
    #[serde(default)]
    pub elements: BTreeMap<TargetId, ElementBox>,
}

impl StaticLayout {
    /// Empty layout of the given size.
    pub fn new(viewport: Viewport, document_height: f64) -> Self {
        Self {
            viewport,
            document_height,
            elements: BTreeMap::new(),
        }
    }

    /// Add or replace an element.
    pub fn with_element(mut self, target: impl Into<TargetId>, offset_top: f64, scroll_width: f64) -> Self {
        self.set_element(target.into(), offset_top, scroll_width);
        self
    }

    /// Add or replace an element in place.
    pub fn set_element(&mut self, target: TargetId, offset_top: f64, scroll_width: f64) {
        self.elements.insert(
            target,
            ElementBox {
                offset_top,
                scroll_width,
            },
        );
    }

    /// Remove an element, as if it left the page.
    pub fn remove_element(&mut self, target: &TargetId) {
        self.elements.remove(target);
    }
}

impl GeometryProvider for StaticLayout {
    fn element_offset(&self, target: &TargetId) -> Option<f64> {
        self.elements.get(target).map(|b| b.offset_top)
    }

    fn scroll_width(&self, target: &TargetId) -> Option<f64> {
        self.elements.get(target).map(|b| b.scroll_width)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn document_extent(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }
}
