//! RGBA raster images.

use std::fmt;
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Size};

/// An immutable RGBA raster, cheap to clone.
///
/// Backed by an [`image::RgbaImage`]. Used for icon content and for text
/// badges produced by a [`TextRasterizer`](crate::TextRasterizer).
#[derive(Clone)]
pub struct Image {
    inner: Arc<RgbaImage>,
}

impl Image {
    /// Create a transparent image. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Self::from_color(width, height, Color::TRANSPARENT)
    }

    /// Create an image filled with a solid color.
    pub fn from_color(width: u32, height: u32, color: Color) -> RenderResult<Self> {
        check_dimensions(width, height)?;
        let buffer = RgbaImage::from_pixel(width, height, Rgba(color.to_rgba8()));
        Ok(Self::from_rgba_image(buffer))
    }

    /// Create an image from raw RGBA pixel data in row-major order.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> RenderResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        RgbaImage::from_raw(width, height, data)
            .map(Self::from_rgba_image)
            .ok_or(RenderError::InvalidPixelData { expected, actual })
    }

    /// Wrap an existing buffer.
    pub fn from_rgba_image(buffer: RgbaImage) -> Self {
        Self {
            inner: Arc::new(buffer),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// The image size in pixels.
    pub fn size(&self) -> Size {
        Size::from((self.width(), self.height()))
    }

    /// Read a single pixel, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.inner.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Borrow the underlying buffer.
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.inner
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.dimensions() == other.inner.dimensions()
                && self.inner.as_raw() == other.inner.as_raw())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn check_dimensions(width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Image::new(0, 4).unwrap_err(),
            RenderError::InvalidDimensions { width: 0, height: 4 }
        );
    }

    #[test]
    fn test_from_color() {
        let img = Image::from_color(2, 3, Color::WHITE).unwrap();
        assert_eq!(img.size(), Size::new(2.0, 3.0));
        assert_eq!(img.pixel(1, 2), Some([255, 255, 255, 255]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn test_from_rgba_length_mismatch() {
        let err = Image::from_rgba(vec![0; 7], 1, 2).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidPixelData {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_equality_by_content() {
        let a = Image::from_color(2, 2, Color::BLACK).unwrap();
        let b = Image::from_color(2, 2, Color::BLACK).unwrap();
        let c = Image::from_color(2, 2, Color::WHITE).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }
}
