//! Declarative geometry.
//!
//! There is no layout engine; elements declare their document position via
//! `data-top` and `data-height` attributes and the viewport converts those
//! into scroll-relative rectangles. `data-top` is inherited from the
//! nearest annotated ancestor so a block's children share its position.

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) width: i64,
    pub(crate) height: i64,
    pub(crate) scroll_y: i64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            scroll_y: 0,
        }
    }
}

/// Viewport-relative bounding box, like `getBoundingClientRect` restricted
/// to the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rect {
    pub(crate) top: f64,
    pub(crate) bottom: f64,
}

impl Dom {
    /// Document-space top edge: the node's own `data-top`, else the nearest
    /// ancestor's, else 0.
    pub(crate) fn doc_top(&self, node_id: NodeId) -> f64 {
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if let Some(value) = self.attr(current, "data-top") {
                if let Ok(top) = value.trim().parse::<f64>() {
                    return top;
                }
            }
            cursor = self.parent(current);
        }
        0.0
    }

    /// Rendered height from `data-height`; unannotated elements report 0,
    /// like unstyled empty boxes.
    pub(crate) fn box_height(&self, node_id: NodeId) -> f64 {
        self.attr(node_id, "data-height")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or(0.0)
    }

    pub(crate) fn bounding_rect(&self, node_id: NodeId, scroll_y: i64) -> Rect {
        let top = self.doc_top(node_id) - scroll_y as f64;
        Rect {
            top,
            bottom: top + self.box_height(node_id),
        }
    }
}
