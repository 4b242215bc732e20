//! chipflow - a wrapping chips input widget.
//!
//! This is the umbrella crate. It re-exports the core object and signal
//! systems, the render value types under [`render`], and provides the widget
//! layer:
//!
//! - [`ChipsLayout`]: chips in a wrapping flow, then an input and an action
//!   icon, with collapse to the first line
//! - [`Chip`]: one selectable, deletable entity
//! - [`ChipsLayoutConfig`]: construction-time settings, from code or TOML
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chipflow::prelude::*;
//!
//! let mut chips = ChipsLayout::new();
//! chips.add_chip(Arc::new(SimpleChipModel::new("1", Icon::named("boy"), "Ada")));
//! chips.add_chip(Arc::new(SimpleChipModel::new("2", Icon::named("girl"), "Grace")));
//!
//! let size = chips.layout(SizeConstraints::at_most_width(320.0));
//! assert!(size.width <= 320.0);
//! assert_eq!(chips.all_chips().len(), 2);
//! ```

pub use chipflow_core::*;

/// Geometry, images, icons and badge rasterization.
pub mod render {
    pub use chipflow_render::*;
}

pub mod config;
mod error;
pub mod model;
pub mod widget;

pub use config::ChipsLayoutConfig;
pub use error::{ConfigError, Error, Result};
pub use model::{ChipModel, SimpleChipModel};
pub use widget::widgets::{Chip, ChipState, ChipsLayout, LayoutMode};

/// Common imports for building a chips input.
pub mod prelude {
    pub use crate::config::ChipsLayoutConfig;
    pub use crate::model::{ChipModel, SimpleChipModel};
    pub use crate::render::{Color, Icon, Point, Rect, Size};
    pub use crate::widget::widgets::{
        Chip, ChipGesture, ChipState, ChipsLayout, CollapseOutcome, ImageWidget, LayoutMode,
        LineEdit,
    };
    pub use crate::widget::{SizeConstraint, SizeConstraints, Widget};
    pub use chipflow_core::{Object, ObjectId, Signal};
}
