//! Partitioning of a drawing surface into the rectangles each chart draws in.
//!
//! Layout is recomputed from scratch every pass; nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::core::geometry::inscribed_square;
use crate::core::label_fit::ChordRegion;
use crate::core::{DataPoint, Rect, Viewport};
use crate::error::{ChartError, ChartResult};

/// Ring stroke inset multiplier so the arc stroke never clips the surface.
pub const BORDER_FACTOR: f64 = 1.2;

/// Fraction of the ring edge used as the arc stroke width at thickness 1.0.
pub const ARC_WIDTH_EDGE_RATIO: f64 = 1.0 / 20.0;

/// Upper bound on the arc stroke width as a fraction of the ring edge.
///
/// Keeps the arc square and the label circle non-empty for every accepted
/// thickness factor.
pub const MAX_ARC_WIDTH_EDGE_RATIO: f64 = 0.25;

/// Bands reserved around the plot area of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub title_height: f64,
    pub x_label_height: f64,
    pub y_label_width: f64,
    pub right_margin: f64,
    /// Padding between a label band and the plot, equal to the thickest stroke in use.
    pub breath: f64,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            title_height: 20.0,
            x_label_height: 20.0,
            y_label_width: 20.0,
            right_margin: 5.0,
            breath: 5.0,
        }
    }
}

impl ChartMargins {
    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("title height", self.title_height),
            ("x label height", self.x_label_height),
            ("y label width", self.y_label_width),
            ("right margin", self.right_margin),
            ("breath", self.breath),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Outer control frame of any chart: the surface minus its last pixel row/column.
#[must_use]
pub fn control_frame(viewport: Viewport) -> Rect {
    Rect::new(
        0.0,
        0.0,
        f64::from(viewport.width) - 1.0,
        f64::from(viewport.height) - 1.0,
    )
}

/// Nested rectangles of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrames {
    pub control: Rect,
    pub plot: Rect,
    pub title_band: Rect,
    pub x_label_band: Rect,
    pub y_label_band: Rect,
}

impl ChartFrames {
    pub fn compute(viewport: Viewport, margins: ChartMargins) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        margins.validate()?;

        let control = control_frame(viewport);
        let plot = Rect::new(
            control.left + margins.y_label_width,
            control.top + margins.title_height,
            control.right - margins.right_margin,
            control.bottom - margins.x_label_height,
        );
        if !plot.has_area() {
            return Err(ChartError::LayoutTooSmall {
                width: plot.width(),
                height: plot.height(),
            });
        }

        Ok(Self {
            control,
            plot,
            title_band: Rect::new(plot.left, control.top, plot.right, plot.top),
            x_label_band: Rect::new(plot.left, plot.bottom, plot.right, control.bottom),
            y_label_band: Rect::new(control.left, plot.top, plot.left, plot.bottom),
        })
    }
}

/// One bar-chart column slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSlot {
    /// Full-height area the bars of this column grow in.
    pub frame: Rect,
    /// Area below the bar frame holding the column label.
    pub label_frame: Rect,
}

/// Rectangles of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarFrames {
    pub control: Rect,
    pub bar_frame: Rect,
    pub slots: Vec<ColumnSlot>,
}

impl BarFrames {
    /// Number of slots laid out for `entry_count` entries; never zero so the
    /// layout stays stable without data.
    #[must_use]
    pub fn slot_count(entry_count: usize) -> usize {
        entry_count.max(1)
    }

    /// Width of one slot when `entry_count` columns share `viewport`.
    #[must_use]
    pub fn slot_width(viewport: Viewport, entry_count: usize) -> f64 {
        control_frame(viewport).width() / Self::slot_count(entry_count) as f64
    }

    pub fn compute(
        viewport: Viewport,
        label_height: f64,
        breath: f64,
        entry_count: usize,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let control = control_frame(viewport);
        let bar_frame = Rect::new(
            control.left,
            control.top,
            control.right,
            control.bottom - label_height - breath,
        );
        if !bar_frame.has_area() {
            return Err(ChartError::LayoutTooSmall {
                width: bar_frame.width(),
                height: bar_frame.height(),
            });
        }

        let count = Self::slot_count(entry_count);
        let slot_width = bar_frame.width() / count as f64;
        let slots = (0..count)
            .map(|index| {
                let left = bar_frame.left + slot_width * index as f64;
                let right = left + slot_width;
                ColumnSlot {
                    frame: Rect::new(left, bar_frame.top, right, bar_frame.bottom),
                    label_frame: Rect::new(
                        left,
                        bar_frame.bottom + breath,
                        right,
                        bar_frame.bottom + breath + label_height,
                    ),
                }
            })
            .collect();

        Ok(Self {
            control,
            bar_frame,
            slots,
        })
    }
}

/// Geometry of a ring meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingLayout {
    pub origin: DataPoint,
    /// Square whose inscribed circle is the arc centerline.
    pub arc_bounds: Rect,
    pub arc_line_width: f64,
    /// Radius of the arc centerline.
    pub radius: f64,
    /// Circle inside the stroke available for labels.
    pub label_region: ChordRegion,
}

impl RingLayout {
    pub fn compute(viewport: Viewport, thickness_factor: f64) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let edge = f64::from(viewport.width.min(viewport.height));
        let half_edge = edge / 2.0;
        let arc_line_width =
            (edge * ARC_WIDTH_EDGE_RATIO * thickness_factor).min(edge * MAX_ARC_WIDTH_EDGE_RATIO);
        let border = arc_line_width * BORDER_FACTOR;
        let origin = viewport.center();

        let arc_bounds = Rect::new(
            origin.x - half_edge + border,
            origin.y - half_edge + border,
            origin.x + half_edge - 1.0 - border,
            origin.y + half_edge - 1.0 - border,
        );
        if !arc_bounds.has_area() {
            return Err(ChartError::LayoutTooSmall {
                width: arc_bounds.width(),
                height: arc_bounds.height(),
            });
        }

        let radius = arc_bounds.width() / 2.0;
        let inner_radius = (radius - arc_line_width / 2.0).max(0.0);

        Ok(Self {
            origin,
            arc_bounds,
            arc_line_width,
            radius,
            label_region: ChordRegion {
                radius: inner_radius,
                inscribed: inscribed_square(origin, inner_radius),
            },
        })
    }
}
