use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::frame_layout::ChartFrames;
use crate::core::label_fit::{
    AXIS_LABEL_START_SIZE_PX, LabelMetrics, fit_labels_to_width, fit_to_height, fit_to_rect,
};
use crate::core::{ChartMargins, LineLabel, LineSeries, PlotMapping, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawLayer, LinePrimitive, PointPrimitive, RectPrimitive, RenderFrame, TextHAlign,
    TextMeasurer, TextPrimitive, Typeface,
};

use super::{Chart, DEBUG_OVERLAY_COLOR};

/// Vertex markers are this many times wider than the series stroke.
pub const MARKER_STROKE_RATIO: f64 = 5.0;

/// Style and layout configuration of a [`LineChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub margins: ChartMargins,
    pub background_color: Color,
    pub axis_color: Color,
    pub gridline_color: Color,
    pub label_color: Color,
    pub title_color: Color,
    pub typeface: Typeface,
    pub axis_line_width: f64,
    pub gridline_width: f64,
    /// Percent in `(0, 100]`; other values mean 100.
    pub x_label_font_scale: f64,
    /// Percent in `(0, 100]`; other values mean 100.
    pub y_label_font_scale: f64,
    /// Draws the frame rectangles on top of the chart.
    pub layout_grid: bool,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            x_range: (0.0, 10.0),
            y_range: (0.0, 10.0),
            margins: ChartMargins::default(),
            background_color: Color::rgba(0.0, 0.0, 0.0, 0.0),
            axis_color: Color::rgb(1.0, 1.0, 1.0),
            gridline_color: Color::rgb(1.0, 1.0, 1.0),
            label_color: Color::rgb(0.0, 0.0, 0.0),
            title_color: Color::rgb(0.0, 0.0, 0.0),
            typeface: Typeface::default(),
            axis_line_width: 2.0,
            gridline_width: 1.0,
            x_label_font_scale: 100.0,
            y_label_font_scale: 100.0,
            layout_grid: false,
        }
    }
}

impl LineChartConfig {
    #[must_use]
    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = (min, max);
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: ChartMargins) -> Self {
        self.margins = margins;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.margins.validate()?;
        for color in [
            self.background_color,
            self.axis_color,
            self.gridline_color,
            self.label_color,
            self.title_color,
        ] {
            color.validate()?;
        }
        for (name, width) in [
            ("axis line width", self.axis_line_width),
            ("gridline width", self.gridline_width),
        ] {
            if !width.is_finite() || width < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Multi-series line graph with gridlines and axis tick labels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineChart {
    pub config: LineChartConfig,
    pub series: Vec<LineSeries>,
    pub x_labels: Vec<LineLabel>,
    pub y_labels: Vec<LineLabel>,
    pub title: Option<String>,
}

impl LineChart {
    #[must_use]
    pub fn new(config: LineChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// X label font size: one text line fills the label band minus breath.
    #[must_use]
    pub fn x_label_metrics(&self, measurer: &dyn TextMeasurer) -> LabelMetrics {
        let margins = self.config.margins;
        fit_to_height(
            measurer,
            &self.config.typeface,
            margins.x_label_height - margins.breath,
            AXIS_LABEL_START_SIZE_PX,
            self.config.x_label_font_scale,
        )
    }

    /// Y label font size: the widest label fills the label band minus breath.
    #[must_use]
    pub fn y_label_metrics(&self, measurer: &dyn TextMeasurer) -> LabelMetrics {
        let margins = self.config.margins;
        fit_labels_to_width(
            measurer,
            self.y_labels.iter().map(LineLabel::text),
            &self.config.typeface,
            margins.y_label_width - margins.breath,
            AXIS_LABEL_START_SIZE_PX,
            self.config.y_label_font_scale,
        )
    }

    fn push_gridlines(&self, frame: &mut RenderFrame, mapping: &PlotMapping) {
        let plot = mapping.frame;
        let style = &self.config;

        for tick in self
            .x_labels
            .iter()
            .filter(|tick| tick.draw_gridline && mapping.x.is_interior(tick.location))
        {
            let x = mapping.x_to_pixel(tick.location);
            frame.line(
                DrawLayer::Grid,
                LinePrimitive::new(
                    x,
                    plot.top,
                    x,
                    plot.bottom,
                    style.gridline_width,
                    style.gridline_color,
                ),
            );
        }

        for tick in self
            .y_labels
            .iter()
            .filter(|tick| tick.draw_gridline && mapping.y.is_interior(tick.location))
        {
            let y = mapping.y_to_pixel(tick.location);
            frame.line(
                DrawLayer::Grid,
                LinePrimitive::new(
                    plot.left,
                    y,
                    plot.right,
                    y,
                    style.gridline_width,
                    style.gridline_color,
                ),
            );
        }
    }

    fn push_axes(&self, frame: &mut RenderFrame, plot: Rect) {
        let width = self.config.axis_line_width;
        let color = self.config.axis_color;
        frame.line(
            DrawLayer::Grid,
            LinePrimitive::new(plot.left, plot.top, plot.left, plot.bottom, width, color),
        );
        frame.line(
            DrawLayer::Grid,
            LinePrimitive::new(plot.left, plot.bottom, plot.right, plot.bottom, width, color),
        );
    }

    fn push_series(&self, frame: &mut RenderFrame, mapping: &PlotMapping) {
        for series in self.series.iter().filter(|series| series.is_drawable()) {
            let mapped: Vec<_> = series
                .points
                .iter()
                .map(|point| mapping.map_point(*point))
                .collect();

            for pair in mapped.windows(2) {
                frame.line(
                    DrawLayer::Series,
                    LinePrimitive::between(
                        pair[0],
                        pair[1],
                        series.stroke_width(),
                        series.line_color,
                    ),
                );
            }

            let marker = series.stroke_width() * MARKER_STROKE_RATIO;
            for vertex in &mapped {
                frame.point(
                    DrawLayer::Series,
                    PointPrimitive::dot(*vertex, marker, series.line_color),
                );
            }
        }
    }

    fn push_x_labels(&self, frame: &mut RenderFrame, mapping: &PlotMapping, metrics: LabelMetrics) {
        let baseline = mapping.frame.bottom + metrics.line_height - metrics.descent
            + self.config.margins.breath;

        for tick in self.x_labels.iter().filter(|tick| !tick.is_blank()) {
            frame.text(
                DrawLayer::Labels,
                TextPrimitive::new(
                    tick.text(),
                    mapping.x_to_pixel(tick.location),
                    baseline,
                    metrics.font_size,
                    self.config.label_color,
                    TextHAlign::Center,
                )
                .with_typeface(self.config.typeface.clone()),
            );
        }
    }

    fn push_y_labels(
        &self,
        frame: &mut RenderFrame,
        mapping: &PlotMapping,
        metrics: LabelMetrics,
        measurer: &dyn TextMeasurer,
    ) {
        let x = mapping.frame.left - self.config.margins.breath;

        for tick in self.y_labels.iter().filter(|tick| !tick.is_blank()) {
            let bounds =
                measurer.measure_text(tick.text(), metrics.font_size, &self.config.typeface);
            frame.text(
                DrawLayer::Labels,
                TextPrimitive::new(
                    tick.text(),
                    x,
                    mapping.y_to_pixel(tick.location) + bounds.height / 2.0,
                    metrics.font_size,
                    self.config.label_color,
                    TextHAlign::Right,
                )
                .with_typeface(self.config.typeface.clone()),
            );
        }
    }

    fn push_title(&self, frame: &mut RenderFrame, band: Rect, measurer: &dyn TextMeasurer) {
        let Some(title) = self.title.as_deref().map(str::trim) else {
            return;
        };
        if title.is_empty() || !band.has_area() {
            return;
        }

        let metrics = fit_to_rect(
            measurer,
            title,
            &self.config.typeface,
            band.width(),
            band.height(),
            AXIS_LABEL_START_SIZE_PX,
        );
        frame.text(
            DrawLayer::Labels,
            TextPrimitive::new(
                title,
                band.mid_x(),
                band.mid_y() + metrics.line_height / 2.0 - metrics.descent,
                metrics.font_size,
                self.config.title_color,
                TextHAlign::Center,
            )
            .with_typeface(self.config.typeface.clone()),
        );
    }

    fn push_layout_grid(frame: &mut RenderFrame, frames: &ChartFrames) {
        for rect in [frames.control, frames.plot] {
            frame.rect(
                DrawLayer::Debug,
                RectPrimitive::stroked(rect, DEBUG_OVERLAY_COLOR, 1.0),
            );
        }
    }
}

impl Chart for LineChart {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn build_render_frame(
        &self,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<RenderFrame> {
        self.config.validate()?;
        let frames = ChartFrames::compute(viewport, self.config.margins)?;
        let x_metrics = self.x_label_metrics(measurer);
        let y_metrics = self.y_label_metrics(measurer);

        let mut frame = RenderFrame::new(viewport);
        frame.clear(self.config.background_color);

        let mapping = match PlotMapping::new(frames.plot, self.config.x_range, self.config.y_range)
        {
            Ok(mapping) => Some(mapping),
            Err(err) => {
                warn!(error = %err, "line chart range is degenerate, drawing axes only");
                None
            }
        };

        if let Some(mapping) = &mapping {
            self.push_gridlines(&mut frame, mapping);
        }
        self.push_axes(&mut frame, frames.plot);
        if let Some(mapping) = &mapping {
            self.push_series(&mut frame, mapping);
            self.push_x_labels(&mut frame, mapping, x_metrics);
            self.push_y_labels(&mut frame, mapping, y_metrics, measurer);
        }
        self.push_title(&mut frame, frames.title_band, measurer);
        if self.config.layout_grid {
            Self::push_layout_grid(&mut frame, &frames);
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            series = self.series.len(),
            commands = frame.len(),
            "built line chart frame"
        );
        Ok(frame)
    }
}
