use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::frame_layout::{RingLayout, control_frame};
use crate::core::geometry::{normalize_angle_360, point_on_circle};
use crate::core::label_fit::{LabelMetrics, fit_to_chord};
use crate::core::{DataPoint, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPaint, ArcPrimitive, Color, DrawLayer, LinePrimitive, PointPrimitive, RectPrimitive,
    RenderFrame, SweepGradient, TextHAlign, TextMeasurer, TextPrimitive, Typeface,
};

use super::{Chart, DEBUG_OVERLAY_COLOR};

/// Angle of the top of the ring in screen degrees (0° right, clockwise).
pub const TOP_ANGLE_DEG: f64 = 270.0;

/// Length of the highlighted tail drawn once progress passes a full turn.
pub const WRAP_TAIL_SWEEP_DEG: f64 = 180.0;

/// Handle shadow trails the handle by `arc_line_width · ratio` degrees.
pub const HANDLE_SHADOW_OFFSET_RATIO: f64 = 0.075;

/// Handle dots are this many arc widths wide.
pub const HANDLE_WIDTH_RATIO: f64 = 2.0;

pub const MIN_ARC_THICKNESS: f64 = 0.02;
pub const MAX_ARC_THICKNESS: f64 = 10.0;

const LABEL_OVERLAY_COLOR: Color = Color::rgb(1.0, 0.65, 0.0);

/// What the ring shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RingMeterMode {
    /// `value` out of `goal`; values past the goal wrap around.
    Progress { value: f64, goal: f64 },
    /// Two-segment split of `first + second`.
    Pie { first: f64, second: f64 },
}

impl Default for RingMeterMode {
    fn default() -> Self {
        Self::Progress {
            value: 0.0,
            goal: 360.0,
        }
    }
}

/// Progress arc extent relative to the top of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProgressSweep {
    /// Nothing to show; only the background ring is drawn.
    Disabled,
    /// Less than one full turn.
    Partial { sweep: f64 },
    /// At least one full turn; `sweep` is the position within the current turn.
    Wrapped { revolutions: u64, sweep: f64 },
}

impl ProgressSweep {
    /// Sweep of the leading edge from the top, if any.
    #[must_use]
    pub fn leading_sweep(self) -> Option<f64> {
        match self {
            Self::Disabled => None,
            Self::Partial { sweep } | Self::Wrapped { sweep, .. } => Some(sweep),
        }
    }
}

#[must_use]
pub fn progress_sweep(value: f64, goal: f64) -> ProgressSweep {
    if !(value > 0.0 && goal > 0.0) || !value.is_finite() || !goal.is_finite() {
        return ProgressSweep::Disabled;
    }
    if value < goal {
        return ProgressSweep::Partial {
            sweep: value / goal * 360.0,
        };
    }

    let remainder = value % goal;
    let sweep = if remainder == 0.0 {
        360.0
    } else {
        remainder / goal * 360.0
    };
    let revolutions = (value / goal).floor() as u64;
    ProgressSweep::Wrapped { revolutions, sweep }
}

/// Two pie segments in screen degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSweeps {
    pub first_start: f64,
    pub first_sweep: f64,
    pub second_start: f64,
    pub second_sweep: f64,
}

/// Splits the ring between `first` and `second`; `None` when the total is not positive.
#[must_use]
pub fn pie_sweeps(first: f64, second: f64) -> Option<PieSweeps> {
    let total = first + second;
    if !(total > 0.0) || !total.is_finite() {
        return None;
    }

    let first_sweep = (first / total * 360.0).clamp(0.0, 360.0);
    Some(PieSweeps {
        first_start: TOP_ANGLE_DEG,
        first_sweep,
        second_start: normalize_angle_360(TOP_ANGLE_DEG + first_sweep),
        second_sweep: 360.0 - first_sweep,
    })
}

/// Text drawn inside the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingLabel {
    pub text: String,
    pub color: Color,
    pub bold: bool,
    font_scale: f64,
}

impl Default for RingLabel {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Color::rgb(0.0, 0.0, 0.0),
            bold: false,
            font_scale: 100.0,
        }
    }
}

impl RingLabel {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn font_scale(&self) -> f64 {
        self.font_scale
    }

    /// Percent in `(0, 100]`; anything else resets to 100.
    pub fn set_font_scale(&mut self, percent: f64) {
        self.font_scale = if percent > 0.0 && percent <= 100.0 {
            percent
        } else {
            100.0
        };
    }

    #[must_use]
    pub fn with_font_scale(mut self, percent: f64) -> Self {
        self.set_font_scale(percent);
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingMeterConfig {
    pub mode: RingMeterMode,
    arc_thickness: f64,
    pub color1: Color,
    pub color2: Color,
    /// Background ring color.
    pub disabled_color: Color,
    /// Surface color; also paints the handle shadow.
    pub background_color: Color,
    pub typeface: Typeface,
    pub primary_label: RingLabel,
    pub secondary_label: RingLabel,
    /// Pie mode only: dots at both segment starts.
    pub pie_handles: bool,
    pub antialias: bool,
    pub layout_grid: bool,
}

impl Default for RingMeterConfig {
    fn default() -> Self {
        Self {
            mode: RingMeterMode::default(),
            arc_thickness: 1.0,
            color1: Color::from_rgb8(0, 128, 0),
            color2: Color::from_rgb8(211, 211, 211),
            disabled_color: Color::from_rgb8(128, 128, 128),
            background_color: Color::rgb(1.0, 1.0, 1.0),
            typeface: Typeface::default(),
            primary_label: RingLabel::default(),
            secondary_label: RingLabel::default(),
            pie_handles: false,
            antialias: true,
            layout_grid: false,
        }
    }
}

impl RingMeterConfig {
    #[must_use]
    pub fn arc_thickness(&self) -> f64 {
        self.arc_thickness
    }

    /// Stroke width multiplier, clamped to `[0.02, 10]`.
    pub fn set_arc_thickness(&mut self, factor: f64) {
        self.arc_thickness = if factor.is_nan() {
            1.0
        } else {
            factor.clamp(MIN_ARC_THICKNESS, MAX_ARC_THICKNESS)
        };
    }

    #[must_use]
    pub fn with_arc_thickness(mut self, factor: f64) -> Self {
        self.set_arc_thickness(factor);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RingMeterMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, color1: Color, color2: Color) -> Self {
        self.color1 = color1;
        self.color2 = color2;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, primary: RingLabel, secondary: RingLabel) -> Self {
        self.primary_label = primary;
        self.secondary_label = secondary;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.color1,
            self.color2,
            self.disabled_color,
            self.background_color,
            self.primary_label.color,
            self.secondary_label.color,
        ] {
            color.validate()?;
        }
        let (a, b) = match self.mode {
            RingMeterMode::Progress { value, goal } => (value, goal),
            RingMeterMode::Pie { first, second } => (first, second),
        };
        if !a.is_finite() || !b.is_finite() {
            return Err(ChartError::InvalidData(
                "ring meter values must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Rectangles the ring labels are centered in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingLabelFrames {
    pub primary: Rect,
    pub secondary: Rect,
}

impl RingLabelFrames {
    /// The primary rect is centered on the origin; the secondary sits directly
    /// below it.
    #[must_use]
    pub fn compute(layout: &RingLayout, primary: LabelMetrics, secondary: LabelMetrics) -> Self {
        let origin = layout.origin;
        let half_width = layout.label_region.inscribed.width() / 2.0;
        let primary_rect = Rect::new(
            origin.x - half_width,
            origin.y - primary.line_height / 2.0,
            origin.x + half_width,
            origin.y + primary.line_height / 2.0,
        );
        Self {
            primary: primary_rect,
            secondary: Rect::new(
                primary_rect.left,
                primary_rect.bottom,
                primary_rect.right,
                primary_rect.bottom + secondary.line_height,
            ),
        }
    }
}

/// Circular progress or pie meter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RingMeter {
    pub config: RingMeterConfig,
}

impl RingMeter {
    #[must_use]
    pub fn new(config: RingMeterConfig) -> Self {
        Self { config }
    }

    pub fn layout(&self, viewport: Viewport) -> ChartResult<RingLayout> {
        RingLayout::compute(viewport, self.config.arc_thickness)
    }

    fn label_typeface(&self, label: &RingLabel) -> Typeface {
        self.config.typeface.clone().with_bold(label.bold)
    }

    /// Metrics of the primary and secondary label in `layout`.
    #[must_use]
    pub fn label_metrics(
        &self,
        layout: &RingLayout,
        measurer: &dyn TextMeasurer,
    ) -> (LabelMetrics, LabelMetrics) {
        let fit = |label: &RingLabel| {
            fit_to_chord(
                measurer,
                label.text.trim(),
                &self.label_typeface(label),
                layout.label_region,
                label.font_scale,
            )
        };
        (fit(&self.config.primary_label), fit(&self.config.secondary_label))
    }

    fn arc(&self, layout: &RingLayout, start: f64, sweep: f64, paint: ArcPaint) -> ArcPrimitive {
        ArcPrimitive {
            bounds: layout.arc_bounds,
            start_angle_deg: start,
            sweep_deg: sweep,
            stroke_width: layout.arc_line_width,
            paint,
            antialias: self.config.antialias,
        }
    }

    fn gradient_arc(&self, layout: &RingLayout, start: f64, sweep: f64) -> ArcPrimitive {
        let gradient = SweepGradient::two_stop(
            layout.origin,
            self.config.color1,
            self.config.color2,
            start,
            start + sweep,
        );
        self.arc(layout, start, sweep, ArcPaint::SweepGradient(gradient))
    }

    fn push_background_ring(&self, frame: &mut RenderFrame, layout: &RingLayout) {
        frame.arc(
            DrawLayer::Grid,
            self.arc(layout, 0.0, 360.0, ArcPaint::Solid(self.config.disabled_color)),
        );
    }

    fn handle_dot(layout: &RingLayout, angle: f64, color: Color) -> PointPrimitive {
        PointPrimitive::dot(
            point_on_circle(layout.origin, angle, layout.radius),
            layout.arc_line_width * HANDLE_WIDTH_RATIO,
            color,
        )
    }

    fn push_progress(&self, frame: &mut RenderFrame, layout: &RingLayout, sweep: ProgressSweep) {
        match sweep {
            ProgressSweep::Disabled => {
                self.push_background_ring(frame, layout);
                return;
            }
            ProgressSweep::Partial { sweep } => {
                self.push_background_ring(frame, layout);
                frame.arc(DrawLayer::Series, self.gradient_arc(layout, TOP_ANGLE_DEG, sweep));
            }
            ProgressSweep::Wrapped { sweep, .. } => {
                frame.arc(
                    DrawLayer::Grid,
                    self.arc(layout, 0.0, 360.0, ArcPaint::Solid(self.config.color1)),
                );
                let tail_start = TOP_ANGLE_DEG + sweep - WRAP_TAIL_SWEEP_DEG;
                frame.arc(
                    DrawLayer::Series,
                    self.gradient_arc(layout, tail_start, WRAP_TAIL_SWEEP_DEG),
                );
            }
        }

        if let Some(sweep) = sweep.leading_sweep() {
            let leading = TOP_ANGLE_DEG + sweep;
            let shadow = leading + layout.arc_line_width * HANDLE_SHADOW_OFFSET_RATIO;
            frame.point(
                DrawLayer::Series,
                Self::handle_dot(layout, shadow, self.config.background_color),
            );
            frame.point(
                DrawLayer::Series,
                Self::handle_dot(layout, leading, self.config.color2),
            );
        }
    }

    fn push_pie(&self, frame: &mut RenderFrame, layout: &RingLayout, first: f64, second: f64) {
        self.push_background_ring(frame, layout);
        let Some(sweeps) = pie_sweeps(first, second) else {
            return;
        };

        frame.arc(
            DrawLayer::Series,
            self.arc(
                layout,
                sweeps.first_start,
                sweeps.first_sweep,
                ArcPaint::Solid(self.config.color1),
            ),
        );
        frame.arc(
            DrawLayer::Series,
            self.arc(
                layout,
                sweeps.second_start,
                sweeps.second_sweep,
                ArcPaint::Solid(self.config.color2),
            ),
        );

        if self.config.pie_handles {
            frame.point(
                DrawLayer::Series,
                Self::handle_dot(layout, sweeps.first_start, self.config.color1),
            );
            frame.point(
                DrawLayer::Series,
                Self::handle_dot(layout, sweeps.second_start, self.config.color2),
            );
        }
    }

    fn push_label(
        &self,
        frame: &mut RenderFrame,
        label: &RingLabel,
        metrics: LabelMetrics,
        rect: Rect,
    ) {
        if label.is_blank() {
            return;
        }
        frame.text(
            DrawLayer::Labels,
            TextPrimitive::new(
                label.text.trim(),
                rect.mid_x(),
                rect.bottom - metrics.descent,
                metrics.font_size,
                label.color,
                TextHAlign::Center,
            )
            .with_typeface(self.label_typeface(label)),
        );
    }

    fn push_layout_grid(
        frame: &mut RenderFrame,
        viewport: Viewport,
        layout: &RingLayout,
        labels: &RingLabelFrames,
    ) {
        let control = control_frame(viewport);
        for rect in [control, layout.arc_bounds, layout.label_region.inscribed] {
            frame.rect(DrawLayer::Debug, RectPrimitive::stroked(rect, DEBUG_OVERLAY_COLOR, 1.0));
        }
        for rect in [labels.primary, labels.secondary] {
            frame.rect(DrawLayer::Debug, RectPrimitive::stroked(rect, LABEL_OVERLAY_COLOR, 1.0));
        }

        let origin = layout.origin;
        frame.line(
            DrawLayer::Debug,
            LinePrimitive::between(
                DataPoint::new(control.left, origin.y),
                DataPoint::new(control.right, origin.y),
                1.0,
                DEBUG_OVERLAY_COLOR,
            ),
        );
        frame.line(
            DrawLayer::Debug,
            LinePrimitive::between(
                DataPoint::new(origin.x, control.top),
                DataPoint::new(origin.x, control.bottom),
                1.0,
                DEBUG_OVERLAY_COLOR,
            ),
        );
        frame.point(DrawLayer::Debug, PointPrimitive::dot(origin, 20.0, DEBUG_OVERLAY_COLOR));
    }
}

impl Chart for RingMeter {
    fn kind(&self) -> &'static str {
        "ring"
    }

    fn build_render_frame(
        &self,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<RenderFrame> {
        self.config.validate()?;
        let layout = self.layout(viewport)?;

        let mut frame = RenderFrame::new(viewport);
        frame.clear(self.config.background_color);

        match self.config.mode {
            RingMeterMode::Progress { value, goal } => {
                self.push_progress(&mut frame, &layout, progress_sweep(value, goal));
            }
            RingMeterMode::Pie { first, second } => {
                self.push_pie(&mut frame, &layout, first, second);
            }
        }

        let (primary, secondary) = self.label_metrics(&layout, measurer);
        let label_frames = RingLabelFrames::compute(&layout, primary, secondary);
        self.push_label(&mut frame, &self.config.primary_label, primary, label_frames.primary);
        self.push_label(
            &mut frame,
            &self.config.secondary_label,
            secondary,
            label_frames.secondary,
        );

        if self.config.layout_grid {
            Self::push_layout_grid(&mut frame, viewport, &layout, &label_frames);
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            mode = ?self.config.mode,
            commands = frame.len(),
            "built ring meter frame"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProgressSweep, RingLabel, RingMeterConfig, pie_sweeps, progress_sweep};

    #[test]
    fn progress_below_goal_is_partial() {
        assert_eq!(progress_sweep(90.0, 360.0), ProgressSweep::Partial { sweep: 90.0 });
    }

    #[test]
    fn exact_multiple_of_goal_reports_full_turn() {
        assert_eq!(
            progress_sweep(20.0, 10.0),
            ProgressSweep::Wrapped {
                revolutions: 2,
                sweep: 360.0
            }
        );
    }

    #[test]
    fn empty_pie_draws_no_segments() {
        assert!(pie_sweeps(0.0, 0.0).is_none());
        assert!(pie_sweeps(-3.0, 1.0).is_none());
    }

    #[test]
    fn setters_clamp() {
        let config = RingMeterConfig::default().with_arc_thickness(40.0);
        assert_eq!(config.arc_thickness(), 10.0);
        assert_eq!(RingLabel::new("x").with_font_scale(0.0).font_scale(), 100.0);
        assert_eq!(RingLabel::new("x").with_font_scale(35.0).font_scale(), 35.0);
    }
}
