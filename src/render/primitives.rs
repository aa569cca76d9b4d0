use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DataPoint, Rect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba8(red, green, blue, 255)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Font family and weight used for measuring and drawing text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Typeface {
    /// Family name; empty selects the backend default.
    pub family: String,
    pub bold: bool,
}

impl Typeface {
    #[must_use]
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            bold: false,
        }
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// Ink bounds of a measured string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub width: f64,
    pub height: f64,
}

/// Vertical font metrics, both distances positive and measured from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub ascent: f64,
    pub descent: f64,
}

impl FontMetrics {
    #[must_use]
    pub fn line_height(self) -> f64 {
        self.ascent + self.descent
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Zero draws a hairline.
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    #[must_use]
    pub fn between(from: DataPoint, to: DataPoint, stroke_width: f64, color: Color) -> Self {
        Self::new(from.x, from.y, to.x, to.y, stroke_width, color)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke("line", self.stroke_width)?;
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectStyle {
    Fill,
    Stroke,
}

/// Draw command for an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub style: RectStyle,
    pub color: Color,
    pub stroke_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            style: RectStyle::Fill,
            color,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub const fn stroked(rect: Rect, color: Color, stroke_width: f64) -> Self {
        Self {
            rect,
            style: RectStyle::Stroke,
            color,
            stroke_width,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.rect.is_finite() {
            return Err(ChartError::InvalidData(
                "rect edges must be finite".to_owned(),
            ));
        }
        validate_stroke("rect", self.stroke_width)?;
        self.color.validate()
    }
}

/// Angular color sweep around `center`, interpolating `colors` evenly
/// between `start_angle_deg` and `end_angle_deg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGradient {
    pub center: DataPoint,
    pub colors: SmallVec<[Color; 4]>,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
}

impl SweepGradient {
    #[must_use]
    pub fn two_stop(
        center: DataPoint,
        from: Color,
        to: Color,
        start_angle_deg: f64,
        end_angle_deg: f64,
    ) -> Self {
        let mut colors = SmallVec::new();
        colors.push(from);
        colors.push(to);
        Self {
            center,
            colors,
            start_angle_deg,
            end_angle_deg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArcPaint {
    Solid(Color),
    SweepGradient(SweepGradient),
}

/// Draw command for a stroked elliptical arc inscribed in `bounds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcPrimitive {
    pub bounds: Rect,
    pub start_angle_deg: f64,
    pub sweep_deg: f64,
    pub stroke_width: f64,
    pub paint: ArcPaint,
    pub antialias: bool,
}

impl ArcPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.bounds.is_finite()
            || !self.start_angle_deg.is_finite()
            || !self.sweep_deg.is_finite()
        {
            return Err(ChartError::InvalidData("arc geometry must be finite".to_owned()));
        }
        validate_stroke("arc", self.stroke_width)?;
        match &self.paint {
            ArcPaint::Solid(color) => color.validate(),
            ArcPaint::SweepGradient(gradient) => {
                if gradient.colors.len() < 2 {
                    return Err(ChartError::InvalidData(
                        "sweep gradient needs at least two colors".to_owned(),
                    ));
                }
                gradient.colors.iter().try_for_each(|color| color.validate())
            }
        }
    }
}

/// Draw command for a single point; with `round_cap` it renders as a dot of
/// diameter `stroke_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPrimitive {
    pub x: f64,
    pub y: f64,
    pub stroke_width: f64,
    pub round_cap: bool,
    pub color: Color,
}

impl PointPrimitive {
    #[must_use]
    pub const fn dot(at: DataPoint, diameter: f64, color: Color) -> Self {
        Self {
            x: at.x,
            y: at.y,
            stroke_width: diameter,
            round_cap: true,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "point coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke("point", self.stroke_width)?;
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space; `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub typeface: Typeface,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            typeface: Typeface::default(),
            color,
            h_align,
        }
    }

    #[must_use]
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = typeface;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be blank".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

fn validate_stroke(kind: &str, stroke_width: f64) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{kind} stroke width must be finite and >= 0"
        )));
    }
    Ok(())
}
