use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Rect};
use crate::error::{ChartError, ChartResult};

/// Chart axis identifier used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Linear map from a logical axis range onto a pixel extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMapper {
    min: f64,
    max: f64,
}

impl AxisMapper {
    /// Creates a mapper for `[min, max]`.
    ///
    /// An empty range (`min == max`) has no defined pixel ratio and is
    /// rejected as [`ChartError::DegenerateAxis`].
    pub fn new(axis: Axis, min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(ChartError::DegenerateAxis { axis, min, max });
        }

        Ok(Self { min, max })
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// True when `value` lies strictly between the range bounds.
    #[must_use]
    pub fn is_interior(self, value: f64) -> bool {
        let (low, high) = if self.min < self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        value > low && value < high
    }

    /// `origin + (value - min) * extent / (max - min)`.
    ///
    /// `extent` may be negative to map an axis that grows upwards on screen.
    #[must_use]
    pub fn to_pixel(self, value: f64, origin: f64, extent: f64) -> f64 {
        origin + (value - self.min) * (extent / (self.max - self.min))
    }

    /// Inverse of [`AxisMapper::to_pixel`]; `extent` must be non-zero.
    pub fn to_value(self, pixel: f64, origin: f64, extent: f64) -> ChartResult<f64> {
        if extent == 0.0 || !extent.is_finite() {
            return Err(ChartError::InvalidData(
                "pixel extent must be finite and non-zero".to_owned(),
            ));
        }

        Ok(self.min + (pixel - origin) * ((self.max - self.min) / extent))
    }
}

/// Pair of axis mappers bound to a plot frame.
///
/// X grows from the frame's left edge, Y grows from the bottom edge upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMapping {
    pub x: AxisMapper,
    pub y: AxisMapper,
    pub frame: Rect,
}

impl PlotMapping {
    pub fn new(frame: Rect, x_range: (f64, f64), y_range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            x: AxisMapper::new(Axis::X, x_range.0, x_range.1)?,
            y: AxisMapper::new(Axis::Y, y_range.0, y_range.1)?,
            frame,
        })
    }

    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        self.x.to_pixel(x, self.frame.left, self.frame.width())
    }

    #[must_use]
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        self.y.to_pixel(y, self.frame.bottom, -self.frame.height())
    }

    #[must_use]
    pub fn map_point(&self, point: DataPoint) -> DataPoint {
        DataPoint::new(self.x_to_pixel(point.x), self.y_to_pixel(point.y))
    }
}
