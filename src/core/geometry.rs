//! Angle and circle helpers shared by the ring meter and label fitting.
//!
//! Angles follow screen conventions: 0° points right and positive sweeps run
//! clockwise because the Y axis grows downwards.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::core::{DataPoint, Rect};
use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn degrees_to_radians(angle: f64) -> f64 {
    angle * PI / 180.0
}

/// Converts polar coordinates around the origin into cartesian `(x, y)`.
#[must_use]
pub fn polar_to_cartesian(radians: f64, radius: f64) -> (f64, f64) {
    (radius * radians.cos(), radius * radians.sin())
}

/// Pixel position of `degrees` on a circle of `radius` around `center`.
#[must_use]
pub fn point_on_circle(center: DataPoint, degrees: f64, radius: f64) -> DataPoint {
    let (x, y) = polar_to_cartesian(degrees_to_radians(degrees), radius);
    DataPoint::new(center.x + x, center.y + y)
}

/// Length of the chord lying `distance` away from the circle center.
///
/// Fails with [`ChartError::ChordOutOfDomain`] when the chord would be
/// degenerate or imaginary (`|distance| >= radius`).
pub fn chord_length(radius: f64, distance: f64) -> ChartResult<f64> {
    let distance = distance.abs();
    if !radius.is_finite() || !distance.is_finite() || distance >= radius {
        return Err(ChartError::ChordOutOfDomain { radius, distance });
    }

    Ok(2.0 * (radius * radius - distance * distance).sqrt())
}

/// Reduces `theta` degrees into `[0, 360)`.
#[must_use]
pub fn normalize_angle_360(theta: f64) -> f64 {
    let reduced = ((theta % 360.0) + 360.0) % 360.0;
    // `-1e-17 % 360 + 360` rounds up to exactly 360.0
    if reduced >= 360.0 { 0.0 } else { reduced }
}

/// Reduces `theta` degrees into `[-180, 180]`.
#[must_use]
pub fn normalize_angle_180(theta: f64) -> f64 {
    let reduced = normalize_angle_360(theta);
    if reduced > 180.0 {
        reduced - 360.0
    } else {
        reduced
    }
}

/// Largest axis-aligned square inside a circle of `radius` around `center`.
#[must_use]
pub fn inscribed_square(center: DataPoint, radius: f64) -> Rect {
    if radius <= 0.0 || !radius.is_finite() {
        return Rect::new(center.x, center.y, center.x, center.y);
    }

    Rect::centered(center, radius * FRAC_1_SQRT_2)
}
