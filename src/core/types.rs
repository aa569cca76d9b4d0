use serde::{Deserialize, Serialize};

/// Pixel size of the drawing surface for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Center of the surface in pixel coordinates.
    #[must_use]
    pub fn center(self) -> DataPoint {
        DataPoint::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// A point in either logical data space or pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in pixel space, stored as edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a square of side `2 * half_side` centered on `center`.
    #[must_use]
    pub fn centered(center: DataPoint, half_side: f64) -> Self {
        Self::new(
            center.x - half_side,
            center.y - half_side,
            center.x + half_side,
            center.y + half_side,
        )
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn mid_x(self) -> f64 {
        self.left + self.width() / 2.0
    }

    #[must_use]
    pub fn mid_y(self) -> f64 {
        self.top + self.height() / 2.0
    }

    #[must_use]
    pub fn center(self) -> DataPoint {
        DataPoint::new(self.mid_x(), self.mid_y())
    }

    /// Shrinks every edge towards the center by `amount`.
    #[must_use]
    pub fn inset(self, amount: f64) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    #[must_use]
    pub fn contains(self, point: DataPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// True when both extents are strictly positive.
    #[must_use]
    pub fn has_area(self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}
