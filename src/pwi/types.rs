//! Geometry and color primitives shared by the decoders.

use crate::common::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// An absolute point in document units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`, failing when a coordinate leaves the `i32` range.
    pub fn translate(self, dx: i32, dy: i32) -> Result<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Ok(Self::new(x, y)),
            _ => Err(Error::InvalidFormat(format!(
                "coordinate overflow moving ({}, {}) by ({}, {})",
                self.x, self.y, dx, dy
            ))),
        }
    }
}

/// A width/height pair in document units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An RGB color resolved from the document palette.
///
/// # Examples
///
/// ```rust
/// use pocketword::pwi::Rgb;
///
/// let red = Rgb::new(255, 0, 0);
/// assert_eq!(red.to_string(), "rgb(255, 0, 0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Running extent of every drawing frame seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasBounds {
    pub width: i32,
    pub height: i32,
}

impl CanvasBounds {
    /// Start from a minimum canvas size.
    #[inline]
    pub const fn new(min: Size) -> Self {
        Self {
            width: min.width,
            height: min.height,
        }
    }

    /// Grow to contain a frame at `origin` with extent `size`.
    pub fn include(&mut self, origin: Point, size: Size) {
        self.width = self.width.max(origin.x + size.width);
        self.height = self.height.max(origin.y + size.height);
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_only_grow() {
        let mut bounds = CanvasBounds::new(Size::new(100, 100));
        bounds.include(Point::new(10, 20), Size::new(30, 40));
        assert_eq!(bounds.size(), Size::new(100, 100));

        bounds.include(Point::new(90, 116), Size::new(50, 10));
        assert_eq!(bounds.size(), Size::new(140, 126));

        bounds.include(Point::new(0, 0), Size::new(1, 1));
        assert_eq!(bounds.size(), Size::new(140, 126));
    }

    #[test]
    fn test_translate_rejects_overflow() {
        let p = Point::new(10, -10);
        assert_eq!(p.translate(5, -5).unwrap(), Point::new(15, -15));
        assert!(matches!(
            Point::new(i32::MAX, 0).translate(1, 0),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            Point::new(0, i32::MIN).translate(0, -1),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(132, 130, 0).to_string(), "rgb(132, 130, 0)");
    }
}
