use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::frame_layout::{BarFrames, control_frame};
use crate::core::label_fit::{AXIS_LABEL_START_SIZE_PX, LabelMetrics, fit_labels_to_width};
use crate::core::{ColumnSlot, DataPoint, GraphEntry, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawLayer, LinePrimitive, PointPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextMeasurer, TextPrimitive, Typeface,
};

use super::{Chart, DEBUG_OVERLAY_COLOR};

/// Number of horizontal scale lines drawn when `horizontal_scale` is on.
pub const HORIZONTAL_SCALE_LINES: u32 = 10;

/// Largest share of the surface height (after breath) the label band may take.
pub const MAX_LABEL_BAND_SHARE: f64 = 0.5;

/// Diameter of the dot drawn for an empty column, also its lift above the bottom.
pub const PLACEHOLDER_DOT_DIAMETER: f64 = 10.0;

/// Maps a bar thickness percent onto the per-side margin denominator.
///
/// `margin = slot_width / (min + (max - min) · thickness / 100)`: thickness 0
/// leaves the widest margins, thickness 100 the narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarThicknessCurve {
    pub min_denominator: f64,
    pub max_denominator: f64,
}

impl Default for BarThicknessCurve {
    fn default() -> Self {
        Self {
            min_denominator: 3.0,
            max_denominator: 15.0,
        }
    }
}

impl BarThicknessCurve {
    #[must_use]
    pub fn margin(self, slot_width: f64, thickness_percent: f64) -> f64 {
        let denominator = self.min_denominator
            + (self.max_denominator - self.min_denominator) * thickness_percent / 100.0;
        if denominator <= 0.0 {
            return 0.0;
        }
        slot_width / denominator
    }
}

/// Which bar a column paints on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnPaint {
    /// Empty entry: a single dot keeps the slot visible.
    Placeholder,
    /// Value bar first, threshold bar drawn over it.
    GoalReached,
    /// Threshold bar first, value bar drawn over it.
    GoalMissed,
}

impl ColumnPaint {
    #[must_use]
    pub fn of(entry: &GraphEntry) -> Self {
        if entry.is_empty {
            Self::Placeholder
        } else if entry.reached_threshold() {
            Self::GoalReached
        } else {
            Self::GoalMissed
        }
    }
}

/// Value and threshold bars of one column, both grown from the slot bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnBars {
    pub value: Rect,
    pub threshold: Rect,
}

impl ColumnBars {
    /// `max_value` is the largest value or threshold over all entries; a zero
    /// maximum yields zero-height bars.
    #[must_use]
    pub fn compute(slot: &ColumnSlot, entry: &GraphEntry, max_value: f64, margin: f64) -> Self {
        let frame = slot.frame;
        let scaled = |value: f64| {
            if max_value > 0.0 {
                frame.height() * (value / max_value)
            } else {
                0.0
            }
        };
        let left = frame.left + margin;
        let right = frame.right - margin;

        Self {
            value: Rect::new(left, frame.bottom - scaled(entry.value()), right, frame.bottom),
            threshold: Rect::new(
                left,
                frame.bottom - scaled(entry.threshold()),
                right,
                frame.bottom,
            ),
        }
    }
}

/// Largest value or threshold across `entries`, zero when there are none.
#[must_use]
pub fn max_bar_value(entries: &[GraphEntry]) -> f64 {
    entries
        .iter()
        .flat_map(|entry| [entry.value(), entry.threshold()])
        .fold(0.0, f64::max)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub background_color: Color,
    pub axis_color: Color,
    pub x_label_color: Color,
    pub typeface: Typeface,
    bar_thickness: f64,
    /// Percent in `(0, 100]`; other values mean 100.
    pub x_label_font_scale: f64,
    pub thickness_curve: BarThicknessCurve,
    pub horizontal_scale: bool,
    pub horizontal_axis: bool,
    pub vertical_axis: bool,
    pub layout_grid: bool,
    /// Gap between the bar frame and the label band.
    pub breath: f64,
    pub axis_line_width: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            background_color: Color::rgba(0.0, 0.0, 0.0, 0.0),
            axis_color: Color::rgb(1.0, 1.0, 1.0),
            x_label_color: Color::rgb(1.0, 1.0, 1.0),
            typeface: Typeface::default(),
            bar_thickness: 50.0,
            x_label_font_scale: 100.0,
            thickness_curve: BarThicknessCurve::default(),
            horizontal_scale: false,
            horizontal_axis: false,
            vertical_axis: false,
            layout_grid: false,
            breath: 5.0,
            axis_line_width: 2.0,
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn bar_thickness(&self) -> f64 {
        self.bar_thickness
    }

    /// Negative thickness becomes 1, anything above 100 becomes 100.
    pub fn set_bar_thickness(&mut self, thickness: f64) {
        self.bar_thickness = if thickness.is_nan() || thickness < 0.0 {
            1.0
        } else {
            thickness.min(100.0)
        };
    }

    #[must_use]
    pub fn with_bar_thickness(mut self, thickness: f64) -> Self {
        self.set_bar_thickness(thickness);
        self
    }

    #[must_use]
    pub fn with_axes(mut self, horizontal: bool, vertical: bool) -> Self {
        self.horizontal_axis = horizontal;
        self.vertical_axis = vertical;
        self
    }

    #[must_use]
    pub fn with_horizontal_scale(mut self, enabled: bool) -> Self {
        self.horizontal_scale = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [self.background_color, self.axis_color, self.x_label_color] {
            color.validate()?;
        }
        if !self.breath.is_finite() || self.breath < 0.0 {
            return Err(ChartError::InvalidData(
                "bar label breath must be finite and >= 0".to_owned(),
            ));
        }
        if !self.axis_line_width.is_finite() || self.axis_line_width < 0.0 {
            return Err(ChartError::InvalidData(
                "axis line width must be finite and >= 0".to_owned(),
            ));
        }
        let curve = self.thickness_curve;
        if !(curve.min_denominator > 0.0 && curve.max_denominator >= curve.min_denominator) {
            return Err(ChartError::InvalidData(
                "bar thickness curve needs 0 < min <= max".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Dual-bar chart comparing each entry's value with its threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarChart {
    pub config: BarChartConfig,
    pub entries: Vec<GraphEntry>,
}

impl BarChart {
    #[must_use]
    pub fn new(config: BarChartConfig, entries: Vec<GraphEntry>) -> Self {
        Self { config, entries }
    }

    /// Label metrics shared by all columns; without any label text the band
    /// collapses to zero height.
    ///
    /// Labels are fitted to the slot width, then shrunk so the band never
    /// takes more than [`MAX_LABEL_BAND_SHARE`] of the height left after breath.
    #[must_use]
    pub fn x_label_metrics(&self, viewport: Viewport, measurer: &dyn TextMeasurer) -> LabelMetrics {
        if self.entries.iter().all(|entry| entry.label.trim().is_empty()) {
            return LabelMetrics {
                font_size: AXIS_LABEL_START_SIZE_PX,
                line_height: 0.0,
                descent: 0.0,
            };
        }

        let fitted = fit_labels_to_width(
            measurer,
            self.entries.iter().map(|entry| entry.label.as_str()),
            &self.config.typeface,
            BarFrames::slot_width(viewport, self.entries.len()),
            AXIS_LABEL_START_SIZE_PX,
            self.config.x_label_font_scale,
        );

        let max_line_height =
            (control_frame(viewport).height() - self.config.breath).max(0.0) * MAX_LABEL_BAND_SHARE;
        if fitted.line_height <= max_line_height {
            return fitted;
        }
        LabelMetrics::measure(
            measurer,
            fitted.font_size * max_line_height / fitted.line_height,
            &self.config.typeface,
        )
    }

    /// Frames for `viewport`, with the label band sized by `label_metrics`.
    pub fn frames(
        &self,
        viewport: Viewport,
        label_metrics: LabelMetrics,
    ) -> ChartResult<BarFrames> {
        BarFrames::compute(
            viewport,
            label_metrics.line_height,
            self.config.breath,
            self.entries.len(),
        )
    }

    fn push_horizontal_scale(&self, frame: &mut RenderFrame, bar_frame: Rect) {
        let step = bar_frame.height() / f64::from(HORIZONTAL_SCALE_LINES);
        for index in 0..HORIZONTAL_SCALE_LINES {
            let y = bar_frame.bottom - step * f64::from(index);
            if y <= bar_frame.top {
                break;
            }
            frame.line(
                DrawLayer::Grid,
                LinePrimitive::new(
                    bar_frame.left,
                    y,
                    bar_frame.right,
                    y,
                    1.0,
                    self.config.axis_color,
                ),
            );
        }
    }

    fn push_axes(&self, frame: &mut RenderFrame, bar_frame: Rect) {
        let width = self.config.axis_line_width;
        let color = self.config.axis_color;
        if self.config.horizontal_axis {
            frame.line(
                DrawLayer::Grid,
                LinePrimitive::new(
                    bar_frame.left,
                    bar_frame.bottom,
                    bar_frame.right,
                    bar_frame.bottom,
                    width,
                    color,
                ),
            );
        }
        if self.config.vertical_axis {
            frame.line(
                DrawLayer::Grid,
                LinePrimitive::new(
                    bar_frame.left,
                    bar_frame.top,
                    bar_frame.left,
                    bar_frame.bottom,
                    width,
                    color,
                ),
            );
        }
    }

    fn push_columns(&self, frame: &mut RenderFrame, frames: &BarFrames) {
        let max_value = max_bar_value(&self.entries);

        for (slot, entry) in frames.slots.iter().zip(&self.entries) {
            let margin = self
                .config
                .thickness_curve
                .margin(slot.frame.width(), self.config.bar_thickness);
            let bars = ColumnBars::compute(slot, entry, max_value, margin);
            let value = RectPrimitive::filled(bars.value, entry.value_color);
            let threshold = RectPrimitive::filled(bars.threshold, entry.threshold_color);

            match ColumnPaint::of(entry) {
                ColumnPaint::Placeholder => frame.point(
                    DrawLayer::Series,
                    PointPrimitive::dot(
                        DataPoint::new(
                            slot.frame.mid_x(),
                            slot.frame.bottom - PLACEHOLDER_DOT_DIAMETER,
                        ),
                        PLACEHOLDER_DOT_DIAMETER,
                        self.config.axis_color,
                    ),
                ),
                ColumnPaint::GoalReached => {
                    frame.rect(DrawLayer::Series, value);
                    frame.rect(DrawLayer::Series, threshold);
                }
                ColumnPaint::GoalMissed => {
                    frame.rect(DrawLayer::Series, threshold);
                    frame.rect(DrawLayer::Series, value);
                }
            }
        }
    }

    fn push_x_labels(&self, frame: &mut RenderFrame, frames: &BarFrames, metrics: LabelMetrics) {
        for (slot, entry) in frames.slots.iter().zip(&self.entries) {
            let label = entry.label.trim();
            if label.is_empty() {
                continue;
            }
            frame.text(
                DrawLayer::Labels,
                TextPrimitive::new(
                    label,
                    slot.label_frame.mid_x(),
                    slot.label_frame.bottom - metrics.descent,
                    metrics.font_size,
                    self.config.x_label_color,
                    TextHAlign::Center,
                )
                .with_typeface(self.config.typeface.clone()),
            );
        }
    }

    fn push_layout_grid(frame: &mut RenderFrame, frames: &BarFrames) {
        let stroke = |rect| RectPrimitive::stroked(rect, DEBUG_OVERLAY_COLOR, 1.0);
        frame.rect(DrawLayer::Debug, stroke(frames.control));
        frame.rect(DrawLayer::Debug, stroke(frames.bar_frame));
        for slot in &frames.slots {
            frame.rect(DrawLayer::Debug, stroke(slot.frame));
            frame.rect(DrawLayer::Debug, stroke(slot.label_frame));
        }
    }
}

impl Chart for BarChart {
    fn kind(&self) -> &'static str {
        "bar"
    }

    fn build_render_frame(
        &self,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<RenderFrame> {
        self.config.validate()?;
        let metrics = self.x_label_metrics(viewport, measurer);
        let frames = self.frames(viewport, metrics)?;

        let mut frame = RenderFrame::new(viewport);
        frame.clear(self.config.background_color);
        if self.config.horizontal_scale {
            self.push_horizontal_scale(&mut frame, frames.bar_frame);
        }
        self.push_axes(&mut frame, frames.bar_frame);
        self.push_columns(&mut frame, &frames);
        self.push_x_labels(&mut frame, &frames, metrics);
        if self.config.layout_grid {
            Self::push_layout_grid(&mut frame, &frames);
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            entries = self.entries.len(),
            commands = frame.len(),
            "built bar chart frame"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{BarChartConfig, BarThicknessCurve, ColumnPaint, max_bar_value};
    use crate::core::GraphEntry;

    #[test]
    fn thickness_is_clamped() {
        let mut config = BarChartConfig::default();
        config.set_bar_thickness(-4.0);
        assert_eq!(config.bar_thickness(), 1.0);
        config.set_bar_thickness(140.0);
        assert_eq!(config.bar_thickness(), 100.0);
    }

    #[test]
    fn thicker_bars_leave_smaller_margins() {
        let curve = BarThicknessCurve::default();
        assert_eq!(curve.margin(90.0, 0.0), 30.0);
        assert_eq!(curve.margin(90.0, 100.0), 6.0);
    }

    #[test]
    fn equal_value_and_threshold_reaches_goal() {
        assert_eq!(ColumnPaint::of(&GraphEntry::new(5.0, 5.0)), ColumnPaint::GoalReached);
        assert_eq!(ColumnPaint::of(&GraphEntry::new(4.0, 5.0)), ColumnPaint::GoalMissed);
        assert_eq!(ColumnPaint::of(&GraphEntry::placeholder()), ColumnPaint::Placeholder);
    }

    #[test]
    fn max_covers_thresholds() {
        let entries = [GraphEntry::new(3.0, 11.0), GraphEntry::new(8.0, 2.0)];
        assert_eq!(max_bar_value(&entries), 11.0);
        assert_eq!(max_bar_value(&[]), 0.0);
    }
}
