//! Concrete widgets.
//!
//! - [`Chip`]: one selectable, deletable entity
//! - [`LineEdit`]: the trailing single-line input
//! - [`ImageWidget`]: the action icon and the hidden-count indicator
//! - [`ChipsLayout`]: the container that flows all of the above

mod chip;
mod chips_layout;
mod image_widget;
mod line_edit;

pub use chip::{
    Chip, ChipBackground, ChipEffect, ChipGesture, ChipListener, ChipMetrics, ChipState,
};
pub use chips_layout::{
    ChildSlot, ChipsLayout, CollapseOutcome, DeleteHandler, LayoutMode, MIN_CHILD_COUNT,
};
pub use image_widget::ImageWidget;
pub use line_edit::LineEdit;
