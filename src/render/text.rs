use crate::render::{FontMetrics, TextBounds, Typeface};

/// Text measurement capability of a drawing surface.
///
/// Label fitting runs before any drawing, so layout code only needs this
/// half of the backend. Implementations must scale linearly with
/// `font_size_px`.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64, typeface: &Typeface) -> TextBounds;

    fn font_metrics(&self, font_size_px: f64, typeface: &Typeface) -> FontMetrics;
}

/// Deterministic measurer that needs no font files.
///
/// Glyphs are assumed to be `glyph_width_em` wide (bold adds 10%), ascent and
/// descent are fixed fractions of the em size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub glyph_width_em: f64,
    pub ascent_em: f64,
    pub descent_em: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            glyph_width_em: 0.6,
            ascent_em: 0.9,
            descent_em: 0.25,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text(&self, text: &str, font_size_px: f64, typeface: &Typeface) -> TextBounds {
        let weight = if typeface.bold { 1.1 } else { 1.0 };
        let glyphs = text.chars().count() as f64;
        TextBounds {
            width: glyphs * self.glyph_width_em * weight * font_size_px,
            height: if glyphs > 0.0 {
                self.ascent_em * font_size_px
            } else {
                0.0
            },
        }
    }

    fn font_metrics(&self, font_size_px: f64, _typeface: &Typeface) -> FontMetrics {
        FontMetrics {
            ascent: self.ascent_em * font_size_px,
            descent: self.descent_em * font_size_px,
        }
    }
}
