//! Chart engines and the render driver that owns them.

mod bar_chart;
mod chart_view;
mod line_chart;
mod ring_meter;

pub use bar_chart::{
    BarChart, BarChartConfig, BarThicknessCurve, ColumnBars, ColumnPaint, HORIZONTAL_SCALE_LINES,
    MAX_LABEL_BAND_SHARE, PLACEHOLDER_DOT_DIAMETER, max_bar_value,
};
pub use chart_view::{ChartView, RenderPassOutcome};
pub use line_chart::{LineChart, LineChartConfig, MARKER_STROKE_RATIO};
pub use ring_meter::{
    HANDLE_SHADOW_OFFSET_RATIO, HANDLE_WIDTH_RATIO, MAX_ARC_THICKNESS, MIN_ARC_THICKNESS,
    PieSweeps, ProgressSweep, RingLabel, RingLabelFrames, RingMeter, RingMeterConfig,
    RingMeterMode, TOP_ANGLE_DEG, WRAP_TAIL_SWEEP_DEG, pie_sweeps, progress_sweep,
};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{Color, RenderFrame, TextMeasurer};

/// Stroke color of the layout-grid debug overlay.
pub const DEBUG_OVERLAY_COLOR: Color = Color::rgb(1.0, 0.0, 0.0);

/// A chart that can lay itself out and describe one draw pass.
///
/// Building a frame is pure: the same chart, viewport and measurer always
/// produce the same commands.
pub trait Chart {
    /// Short name used in log fields.
    fn kind(&self) -> &'static str;

    fn build_render_frame(
        &self,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<RenderFrame>;
}
