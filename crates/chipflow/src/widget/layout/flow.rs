//! The chips flow measurement pass.
//!
//! Children are placed left to right and wrap to a new line when the next
//! one would cross the available width. Two kinds of children get special
//! treatment:
//!
//! - the input placeholder always leaves `icon_min_space` free at the end of
//!   its line so the trailing icon never wraps on its own. If the leading
//!   chips leave too little room for that, the placeholder starts a new line;
//! - icon children are centered against the placeholder height through one
//!   container-wide offset. Only the last offset computed in a pass survives
//!   and it applies to every icon child.

use chipflow_core::logging::targets;
use chipflow_core::ObjectId;
use chipflow_render::Size;

use super::slot::{LayoutSlot, SlotTable};

/// Room kept free after the input placeholder for the action icon, in dp.
pub const ICON_MIN_SPACE_DP: f32 = 30.0;
/// Edge length of the action icon and the hidden-count indicator, in dp.
pub const ICON_SIZE_DP: f32 = 24.0;
/// Below this much room left on a line, the placeholder takes a full line, in dp.
pub const EDIT_TEXT_MIN_WIDTH_DP: f32 = 150.0;
/// Subtracted from the available width when a child is wider than the
/// container. Physical pixels, not scaled by density.
pub const OVERFLOW_INSET: f32 = 10.0;

/// Convert density-independent pixels to physical pixels.
///
/// Rounds half up, then truncates.
#[inline]
pub fn dp_to_px(dp: f32, density: f32) -> f32 {
    (dp * density + 0.5).floor()
}

/// What a child is, as far as measurement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowItemKind {
    /// A chip, or any other plain child.
    Chip,
    /// The trailing text input placeholder.
    Input,
    /// An icon child (action icon or hidden-count indicator).
    Icon,
}

/// One visible child handed to the measurer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowItem {
    pub id: ObjectId,
    pub kind: FlowItemKind,
    /// Natural (unconstrained) size.
    pub natural: Size,
}

impl FlowItem {
    pub fn new(id: ObjectId, kind: FlowItemKind, natural: Size) -> Self {
        Self { id, kind, natural }
    }
}

/// Pixel dimensions used by the measurement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowMetrics {
    pub icon_min_space: f32,
    pub edit_text_min_width: f32,
    pub overflow_inset: f32,
}

impl FlowMetrics {
    /// Metrics for a display density.
    pub fn for_density(density: f32) -> Self {
        Self {
            icon_min_space: dp_to_px(ICON_MIN_SPACE_DP, density),
            edit_text_min_width: dp_to_px(EDIT_TEXT_MIN_WIDTH_DP, density),
            overflow_inset: OVERFLOW_INSET,
        }
    }
}

impl Default for FlowMetrics {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

/// Result of one measurement pass.
#[derive(Debug, Clone, Default)]
pub struct FlowMeasurement {
    /// Slot for every measured child.
    pub slots: SlotTable,
    /// Widest line and lowest bottom edge.
    pub content_size: Size,
    /// Vertical offset for icon children, if any icon child was measured.
    pub icon_top_offset: Option<f32>,
    /// Number of lines used.
    pub line_count: usize,
}

/// Runs measurement passes.
///
/// The measurer remembers the placeholder height seen by the first pass and
/// uses it as the reference height in every later pass.
#[derive(Debug, Clone, Default)]
pub struct FlowMeasurer {
    metrics: FlowMetrics,
    edit_height: Option<f32>,
}

impl FlowMeasurer {
    pub fn new(metrics: FlowMetrics) -> Self {
        Self {
            metrics,
            edit_height: None,
        }
    }

    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    /// The reference placeholder height, once a pass has seen the placeholder.
    pub fn edit_height(&self) -> Option<f32> {
        self.edit_height
    }

    /// The width that fits every chip and the placeholder on one line.
    ///
    /// Used in place of the available width when the width is unbounded.
    pub fn single_line_width(&self, items: &[FlowItem]) -> f32 {
        let chips: f32 = items
            .iter()
            .filter(|item| item.kind == FlowItemKind::Chip)
            .map(|item| item.natural.width)
            .sum();
        chips + self.metrics.edit_text_min_width + self.metrics.icon_min_space
    }

    /// Assign a slot to every item for the available width.
    pub fn measure(&mut self, items: &[FlowItem], available_width: f32) -> FlowMeasurement {
        let w = available_width;
        let mut x = 0.0_f32;
        let mut y = 0.0_f32;
        let mut line_height = 0.0_f32;
        let mut max_line_width = 0.0_f32;
        let mut content_height = 0.0_f32;
        let mut line_count = 0;
        let mut icon_top_offset = None;
        let mut slots = SlotTable::with_capacity(items.len());

        for item in items {
            let mut width = item.natural.width;
            let mut height = item.natural.height;
            let mut wrap = false;

            if width > w {
                width = w - self.metrics.overflow_inset;
            }

            match item.kind {
                FlowItemKind::Input => {
                    let reference = match self.edit_height {
                        Some(h) if h > 0.0 => h,
                        _ => {
                            self.edit_height = Some(height);
                            height
                        }
                    };
                    let remaining = w - x;
                    width = if remaining < self.metrics.edit_text_min_width {
                        w - self.metrics.icon_min_space
                    } else {
                        remaining - self.metrics.icon_min_space
                    };
                    width = width.max(0.0);
                    height = height.min(reference);
                    // The icon must fit after the placeholder on the same line.
                    wrap = x > 0.0 && x + width + self.metrics.icon_min_space > w;
                }
                FlowItemKind::Icon => {
                    let reference = self.edit_height.unwrap_or(0.0);
                    icon_top_offset = Some(((reference - height) / 2.0).trunc());
                }
                FlowItemKind::Chip => {}
            }

            if line_count == 0 {
                line_count = 1;
            }

            if wrap || x + width > w {
                max_line_width = max_line_width.max(x);
                x = 0.0;
                y += line_height;
                line_height = 0.0;
                line_count += 1;
            }

            let slot = LayoutSlot::new(x, y, width, height);
            tracing::trace!(
                target: targets::LAYOUT,
                id = ?item.id,
                kind = ?item.kind,
                x,
                y,
                width,
                height,
                "slot assigned"
            );
            slots.insert(item.id, slot);

            x += width;
            line_height = line_height.max(height);
            content_height = content_height.max(y + height);
        }

        max_line_width = max_line_width.max(x);

        FlowMeasurement {
            slots,
            content_size: Size::new(max_line_width, content_height),
            icon_top_offset,
            line_count,
        }
    }
}
