use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::render::Color;

/// One bar-chart column: an achieved `value` against a goal `threshold`.
///
/// Both magnitudes are clamped to be non-negative on every assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEntry {
    value: f64,
    threshold: f64,
    /// No data for this column; it still takes a slot and renders a placeholder.
    pub is_empty: bool,
    pub label: String,
    pub value_color: Color,
    pub threshold_color: Color,
}

impl GraphEntry {
    #[must_use]
    pub fn new(value: f64, threshold: f64) -> Self {
        Self {
            value: clamp_magnitude(value),
            threshold: clamp_magnitude(threshold),
            is_empty: false,
            label: String::new(),
            value_color: Color::from_rgb8(255, 0, 0),
            threshold_color: Color::from_rgb8(100, 100, 100),
        }
    }

    /// Entry without data.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            is_empty: true,
            ..Self::new(0.0, 0.0)
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, value_color: Color, threshold_color: Color) -> Self {
        self.value_color = value_color;
        self.threshold_color = threshold_color;
        self
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = clamp_magnitude(value);
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = clamp_magnitude(threshold);
    }

    /// Goal reached: the value meets or exceeds the threshold.
    #[must_use]
    pub fn reached_threshold(&self) -> bool {
        self.value >= self.threshold
    }
}

impl Default for GraphEntry {
    fn default() -> Self {
        Self::placeholder()
    }
}

fn clamp_magnitude(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One plotted line of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub points: Vec<DataPoint>,
    pub line_color: Color,
    stroke_width: f64,
}

impl LineSeries {
    #[must_use]
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self {
            points,
            line_color: Color::rgb(1.0, 1.0, 1.0),
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.set_stroke_width(stroke_width);
        self
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, stroke_width: f64) {
        self.stroke_width = clamp_magnitude(stroke_width);
    }

    /// A line needs at least two vertices to be drawn.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

impl Default for LineSeries {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// One tick on either axis of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLabel {
    /// Position in logical axis units.
    pub location: f64,
    text: String,
    pub draw_gridline: bool,
}

impl LineLabel {
    #[must_use]
    pub fn new(location: f64, text: &str) -> Self {
        Self {
            location,
            text: text.trim().to_owned(),
            draw_gridline: true,
        }
    }

    #[must_use]
    pub fn without_gridline(mut self) -> Self {
        self.draw_gridline = false;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.trim().to_owned();
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphEntry, LineLabel, LineSeries};

    #[test]
    fn negative_magnitudes_clamp_to_zero() {
        let mut entry = GraphEntry::new(-4.0, -1.0);
        assert_eq!(entry.value(), 0.0);
        assert_eq!(entry.threshold(), 0.0);

        entry.set_value(f64::NAN);
        entry.set_threshold(3.5);
        assert_eq!(entry.value(), 0.0);
        assert_eq!(entry.threshold(), 3.5);
    }

    #[test]
    fn label_text_is_trimmed() {
        let label = LineLabel::new(2.0, "  feb \t");
        assert_eq!(label.text(), "feb");
        assert!(LineLabel::new(0.0, "   ").is_blank());
    }

    #[test]
    fn series_stroke_is_never_negative() {
        let series = LineSeries::default().with_stroke_width(-2.0);
        assert_eq!(series.stroke_width(), 0.0);
        assert!(!series.is_drawable());
    }
}
