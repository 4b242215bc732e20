//! Widget system for chipflow.
//!
//! This module provides:
//!
//! - [`Widget`] trait: the base trait for every element
//! - [`WidgetBase`]: geometry, visibility and identity shared by all widgets
//! - Size hints and constraints for measurement
//! - Click events
//!
//! # Creating a Widget
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement [`Object`](chipflow_core::Object) by delegating to the base
//! 3. Implement [`Widget`], providing `size_hint()`
//!
//! Widgets never paint. Hosts read geometry and visibility after
//! [`ChipsLayout::layout`](widgets::ChipsLayout::layout) and draw however
//! they like.

mod base;
mod events;
mod geometry;
mod traits;

pub mod layout;
pub mod widgets;

pub use base::WidgetBase;
pub use events::{ClickEvent, MouseButton, WidgetEvent};
pub use geometry::{resolve_size, SizeConstraint, SizeConstraints, SizeHint};
pub use traits::Widget;
