//! Geometry, raster and icon types for chipflow.
//!
//! This crate stays free of any windowing or GPU backend. Widgets describe
//! what to show with these value types and the host does the painting.
//!
//! # Key Types
//!
//! - [`Point`], [`Size`], [`Rect`], [`Color`] - geometry and color values
//! - [`Image`] - an immutable RGBA raster
//! - [`Icon`] - an opaque icon reference
//! - [`TextRasterizer`] - the text-to-raster seam used for badges

mod error;
mod icon;
mod raster;
mod text;
mod types;

pub use error::{RenderError, RenderResult};
pub use icon::Icon;
pub use raster::Image;
pub use text::{BadgeStyle, BoxGlyphRasterizer, TextRasterizer};
pub use types::{Color, Point, Rect, Size};
