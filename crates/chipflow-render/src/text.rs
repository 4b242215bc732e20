//! Text-to-raster conversion for small badges.
//!
//! Glyph shaping is the host's business. The [`TextRasterizer`] trait is the
//! seam: given a string and a [`BadgeStyle`], produce a square raster with the
//! text centered on it. [`BoxGlyphRasterizer`] is a metrics-only
//! implementation that draws every visible grapheme as a filled box, which
//! is enough for headless use and tests.

use chipflow_core::logging::targets;
use image::{Rgba, RgbaImage};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{RenderError, RenderResult};
use crate::raster::Image;
use crate::types::{Color, Size};

/// Visual parameters of a text badge.
///
/// `size` and `text_size` are expressed in the caller's unit. Widgets keep the
/// style in density-independent units and call [`BadgeStyle::scaled`] before
/// rasterizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeStyle {
    /// Edge length of the square badge.
    pub size: u32,
    /// Text size.
    pub text_size: f32,
    /// Text color.
    pub color: Color,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            size: 24,
            text_size: 13.0,
            color: Color::GRAY,
        }
    }
}

impl BadgeStyle {
    /// Convert to pixels using the given display density.
    ///
    /// The edge length is rounded the same way as every other dp value.
    pub fn scaled(&self, density: f32) -> Self {
        Self {
            size: (self.size as f32 * density + 0.5).floor() as u32,
            text_size: self.text_size * density,
            color: self.color,
        }
    }
}

/// Turns a short string into a raster.
pub trait TextRasterizer: Send + Sync {
    /// Bounding box of `text` when drawn with `style`.
    fn measure(&self, text: &str, style: &BadgeStyle) -> Size;

    /// Draw `text` centered on a `style.size` square transparent raster.
    fn rasterize(&self, text: &str, style: &BadgeStyle) -> RenderResult<Image>;
}

/// A rasterizer that draws each grapheme as a solid box.
///
/// Each grapheme advances by `advance_ratio * text_size`; boxes are
/// `glyph_height_ratio * text_size` tall. Whitespace advances without drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGlyphRasterizer {
    pub advance_ratio: f32,
    pub glyph_height_ratio: f32,
}

impl Default for BoxGlyphRasterizer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.55,
            glyph_height_ratio: 0.7,
        }
    }
}

impl BoxGlyphRasterizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextRasterizer for BoxGlyphRasterizer {
    fn measure(&self, text: &str, style: &BadgeStyle) -> Size {
        let count = text.graphemes(true).count() as f32;
        Size::new(
            (count * self.advance_ratio * style.text_size).round(),
            if count > 0.0 {
                (self.glyph_height_ratio * style.text_size).round()
            } else {
                0.0
            },
        )
    }

    fn rasterize(&self, text: &str, style: &BadgeStyle) -> RenderResult<Image> {
        let edge = style.size;
        if edge == 0 {
            return Err(RenderError::InvalidDimensions {
                width: edge,
                height: edge,
            });
        }

        let bounds = self.measure(text, style);
        let mut buffer = RgbaImage::new(edge, edge);
        let pixel = Rgba(style.color.to_rgba8());

        // Center the bounding box; the baseline sits at its bottom edge.
        let left = (edge as f32 - bounds.width) / 2.0;
        let baseline = (edge as f32 + bounds.height) / 2.0;
        let top = baseline - bounds.height;
        let advance = self.advance_ratio * style.text_size;

        for (i, grapheme) in text.graphemes(true).enumerate() {
            if grapheme.chars().all(char::is_whitespace) {
                continue;
            }
            let x0 = left + i as f32 * advance;
            // Leave a one pixel gap between neighbouring boxes.
            let x1 = x0 + (advance - 1.0).max(1.0);
            fill_clipped(&mut buffer, x0, top, x1, baseline, pixel);
        }

        tracing::trace!(
            target: targets::RENDER,
            text,
            edge,
            text_width = bounds.width,
            "rasterized badge"
        );

        Ok(Image::from_rgba_image(buffer))
    }
}

fn fill_clipped(buffer: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, pixel: Rgba<u8>) {
    let clamp_x = |v: f32| v.round().clamp(0.0, buffer.width() as f32) as u32;
    let clamp_y = |v: f32| v.round().clamp(0.0, buffer.height() as f32) as u32;
    let (x0, x1) = (clamp_x(x0), clamp_x(x1));
    let (y0, y1) = (clamp_y(y0), clamp_y(y1));
    for y in y0..y1 {
        for x in x0..x1 {
            buffer.put_pixel(x, y, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_pixels(image: &Image) -> usize {
        image
            .as_rgba_image()
            .pixels()
            .filter(|p| p.0[3] != 0)
            .count()
    }

    #[test]
    fn test_default_style() {
        let style = BadgeStyle::default();
        assert_eq!(style.size, 24);
        assert_eq!(style.text_size, 13.0);
        assert_eq!(style.color, Color::GRAY);
    }

    #[test]
    fn test_scaled_rounds_like_dp() {
        let style = BadgeStyle::default().scaled(1.5);
        assert_eq!(style.size, 36);
        assert_eq!(style.text_size, 19.5);

        let style = BadgeStyle::default().scaled(1.33);
        // 24 * 1.33 + 0.5 = 32.42
        assert_eq!(style.size, 32);
    }

    #[test]
    fn test_rasterize_is_square_and_centered() {
        let rasterizer = BoxGlyphRasterizer::new();
        let style = BadgeStyle::default();
        let image = rasterizer.rasterize("+6", &style).unwrap();

        assert_eq!(image.width(), 24);
        assert_eq!(image.height(), 24);
        assert!(opaque_pixels(&image) > 0);
        // Corners stay transparent.
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(23, 23), Some([0, 0, 0, 0]));
        // The center is covered by a glyph box.
        assert_eq!(image.pixel(10, 12).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_rasterize_whitespace_draws_nothing() {
        let rasterizer = BoxGlyphRasterizer::new();
        let image = rasterizer.rasterize("  ", &BadgeStyle::default()).unwrap();
        assert_eq!(opaque_pixels(&image), 0);
    }

    #[test]
    fn test_rasterize_zero_size_fails() {
        let style = BadgeStyle {
            size: 0,
            ..Default::default()
        };
        let err = BoxGlyphRasterizer::new().rasterize("+1", &style).unwrap_err();
        assert_eq!(err, RenderError::InvalidDimensions { width: 0, height: 0 });
    }

    #[test]
    fn test_measure_counts_graphemes() {
        let rasterizer = BoxGlyphRasterizer::new();
        let style = BadgeStyle::default();
        let ascii = rasterizer.measure("ab", &style);
        let combined = rasterizer.measure("e\u{301}e\u{301}", &style);
        assert_eq!(ascii, combined);
        assert_eq!(rasterizer.measure("", &style), Size::ZERO);
    }
}
