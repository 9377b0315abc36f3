use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A point on the drawing surface, in pixels (Y grows downwards).
pub type ScreenPoint = Vec2;

/// Returns true for the all-zero placeholder position.
///
/// Upstream readers report unresolved positions as exactly `(0, 0, 0)`, so
/// the origin is never treated as a real location.
#[inline]
pub fn is_unset(position: Vec3) -> bool {
    position == Vec3::ZERO
}

/// Integer pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Truncates a fractional widget extent to whole pixels.
    /// Negative and NaN extents become zero.
    pub fn from_extent(width: f32, height: f32) -> Self {
        Self {
            width: width as u32,
            height: height as u32,
        }
    }

    /// True when either dimension is zero; nothing can be allocated for it.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Pixel centre of the surface.
    pub fn center(&self) -> ScreenPoint {
        Vec2::new(self.width_f32() * 0.5, self.height_f32() * 0.5)
    }

    /// Inclusive bounds test: points on the right/bottom edge are accepted.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width_f32()
            && point.y <= self.height_f32()
    }
}

/// Axis-aligned rectangle in floating point pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect anchored at the origin covering a whole surface.
    pub fn from_size(size: SurfaceSize) -> Self {
        Self::new(0.0, 0.0, size.width_f32(), size.height_f32())
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Both dimensions strictly positive.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
