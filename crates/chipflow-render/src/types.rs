//! Geometry and color values.
//!
//! Coordinates are physical pixels relative to the parent widget, with y
//! growing downwards.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Raster dimensions as a pixel size.
impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// Axis-aligned rectangle stored as origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::at(Point::new(x, y), Size::new(width, height))
    }

    #[inline]
    pub const fn at(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.width()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Hit test. Left and top edges are inside, right and bottom are not.
    pub fn contains(&self, p: Point) -> bool {
        (self.left()..self.right()).contains(&p.x) && (self.top()..self.bottom()).contains(&p.y)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::at(self.origin.offset(dx, dy), self.size)
    }

    /// `p` relative to this rectangle's origin.
    pub fn to_local(&self, p: Point) -> Point {
        p.offset(-self.left(), -self.top())
    }
}

/// Straight-alpha RGBA, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// `#888888`, the default badge text color.
    pub const GRAY: Self = Self::new(0.533, 0.533, 0.533, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            match digits.get(i..i + 2) {
                Some(pair) => u8::from_str_radix(pair, 16).ok().map(|v| f32::from(v) / 255.0),
                None => Some(1.0),
            }
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?))
    }

    /// Quantize to bytes, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let chip = Rect::new(80.0, 0.0, 80.0, 32.0);
        assert!(chip.contains(Point::new(80.0, 0.0)));
        assert!(chip.contains(Point::new(159.5, 31.5)));
        assert!(!chip.contains(Point::new(160.0, 10.0)));
        assert!(!chip.contains(Point::new(100.0, 32.0)));
    }

    #[test]
    fn test_local_coordinates() {
        let r = Rect::new(80.0, 40.0, 80.0, 32.0);
        assert_eq!(r.to_local(Point::new(90.0, 50.0)), Point::new(10.0, 10.0));
        assert_eq!(r.offset(0.0, 4.0).top(), 44.0);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#FF0000").unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::from_hex("00ff0080").unwrap().to_rgba8(), [0, 255, 0, 128]);
        assert_eq!(Color::from_hex("#888888").unwrap().to_rgba8(), Color::GRAY.to_rgba8());
        assert!(Color::from_hex("#F00").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }
}
