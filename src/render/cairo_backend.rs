use cairo::{Context, Format, ImageSurface, LineCap};
use pango::FontDescription;
use tracing::warn;

use crate::core::geometry::degrees_to_radians;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPaint, ArcPrimitive, Color, DrawCommand, FontMetrics, RectStyle, RenderFrame, Renderer,
    SweepGradient, TextBounds, TextHAlign, TextMeasurer, TextPrimitive, Typeface,
};

/// Degrees covered by one solid slice when approximating a sweep gradient.
const GRADIENT_SLICE_DEG: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
    pub points_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface content as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut stats = CairoRenderStats::default();
        for entry in &frame.commands {
            match &entry.command {
                DrawCommand::Clear(color) => {
                    context.save().map_err(|err| map_backend_error("failed to save state", err))?;
                    context.set_operator(cairo::Operator::Source);
                    apply_color(context, *color);
                    context
                        .paint()
                        .map_err(|err| map_backend_error("failed to clear surface", err))?;
                    context
                        .restore()
                        .map_err(|err| map_backend_error("failed to restore state", err))?;
                }
                DrawCommand::Line(line) => {
                    apply_color(context, line.color);
                    context.set_line_width(effective_stroke(line.stroke_width));
                    context.set_line_cap(LineCap::Butt);
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Rect(rect) => {
                    let bounds = rect.rect;
                    context.rectangle(bounds.left, bounds.top, bounds.width(), bounds.height());
                    apply_color(context, rect.color);
                    match rect.style {
                        RectStyle::Fill => context
                            .fill()
                            .map_err(|err| map_backend_error("failed to fill rectangle", err))?,
                        RectStyle::Stroke => {
                            context.set_line_width(effective_stroke(rect.stroke_width));
                            context.stroke().map_err(|err| {
                                map_backend_error("failed to stroke rectangle", err)
                            })?;
                        }
                    }
                    stats.rects_drawn += 1;
                }
                DrawCommand::Arc(arc) => {
                    draw_arc(context, arc)?;
                    stats.arcs_drawn += 1;
                }
                DrawCommand::Point(point) => {
                    apply_color(context, point.color);
                    let width = effective_stroke(point.stroke_width);
                    if point.round_cap {
                        context.set_line_width(width);
                        context.set_line_cap(LineCap::Round);
                        context.move_to(point.x, point.y);
                        context.line_to(point.x, point.y);
                        context
                            .stroke()
                            .map_err(|err| map_backend_error("failed to stroke point", err))?;
                    } else {
                        let half = width / 2.0;
                        context.rectangle(point.x - half, point.y - half, width, width);
                        context
                            .fill()
                            .map_err(|err| map_backend_error("failed to fill point", err))?;
                    }
                    stats.points_drawn += 1;
                }
                DrawCommand::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

impl TextMeasurer for CairoRenderer {
    fn measure_text(&self, text: &str, font_size_px: f64, typeface: &Typeface) -> TextBounds {
        let Some(layout) = self.measure_layout(font_size_px, typeface) else {
            return TextBounds::default();
        };
        layout.set_text(text);
        let (ink, _logical) = layout.pixel_extents();
        TextBounds {
            width: f64::from(ink.width()),
            height: f64::from(ink.height()),
        }
    }

    fn font_metrics(&self, font_size_px: f64, typeface: &Typeface) -> FontMetrics {
        let Some(layout) = self.measure_layout(font_size_px, typeface) else {
            return FontMetrics::default();
        };
        let description = font_description(font_size_px, typeface);
        let metrics = layout.context().metrics(Some(&description), None);
        FontMetrics {
            ascent: f64::from(metrics.ascent()) / f64::from(pango::SCALE),
            descent: f64::from(metrics.descent()) / f64::from(pango::SCALE),
        }
    }
}

impl CairoRenderer {
    fn measure_layout(&self, font_size_px: f64, typeface: &Typeface) -> Option<pango::Layout> {
        match Context::new(&self.surface) {
            Ok(context) => {
                let layout = pangocairo::functions::create_layout(&context);
                layout.set_font_description(Some(&font_description(font_size_px, typeface)));
                Some(layout)
            }
            Err(err) => {
                warn!(error = %err, "cairo measurement context unavailable");
                None
            }
        }
    }
}

fn draw_arc(context: &Context, arc: &ArcPrimitive) -> ChartResult<()> {
    let center_x = arc.bounds.mid_x();
    let center_y = arc.bounds.mid_y();
    let radius = arc.bounds.width().min(arc.bounds.height()) / 2.0;
    if radius <= 0.0 || arc.sweep_deg == 0.0 {
        return Ok(());
    }

    context.set_antialias(if arc.antialias {
        cairo::Antialias::Default
    } else {
        cairo::Antialias::None
    });
    context.set_line_width(effective_stroke(arc.stroke_width));
    context.set_line_cap(LineCap::Butt);

    match &arc.paint {
        ArcPaint::Solid(color) => {
            apply_color(context, *color);
            append_arc(context, center_x, center_y, radius, arc.start_angle_deg, arc.sweep_deg);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke arc", err))?;
        }
        ArcPaint::SweepGradient(gradient) => {
            let slices = (arc.sweep_deg.abs() / GRADIENT_SLICE_DEG).ceil().max(1.0) as usize;
            let step = arc.sweep_deg / slices as f64;
            for index in 0..slices {
                let start = arc.start_angle_deg + step * index as f64;
                apply_color(context, gradient_color_at(gradient, start + step / 2.0));
                append_arc(context, center_x, center_y, radius, start, step);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke gradient arc", err))?;
            }
        }
    }

    context.set_antialias(cairo::Antialias::Default);
    Ok(())
}

fn append_arc(context: &Context, x: f64, y: f64, radius: f64, start_deg: f64, sweep_deg: f64) {
    context.new_sub_path();
    let start = degrees_to_radians(start_deg);
    let end = degrees_to_radians(start_deg + sweep_deg);
    if sweep_deg >= 0.0 {
        context.arc(x, y, radius, start, end);
    } else {
        context.arc_negative(x, y, radius, start, end);
    }
}

fn gradient_color_at(gradient: &SweepGradient, angle_deg: f64) -> Color {
    let span = gradient.end_angle_deg - gradient.start_angle_deg;
    let t = if span == 0.0 {
        0.0
    } else {
        ((angle_deg - gradient.start_angle_deg) / span).clamp(0.0, 1.0)
    };

    let segments = gradient.colors.len().saturating_sub(1).max(1);
    let position = t * segments as f64;
    let index = (position.floor() as usize).min(segments - 1);
    let local = position - index as f64;
    let from = gradient.colors[index];
    let to = gradient.colors.get(index + 1).copied().unwrap_or(from);

    Color::rgba(
        from.red + (to.red - from.red) * local,
        from.green + (to.green - from.green) * local,
        from.blue + (to.blue - from.blue) * local,
        from.alpha + (to.alpha - from.alpha) * local,
    )
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    layout.set_font_description(Some(&font_description(text.font_size_px, &text.typeface)));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    apply_color(context, text.color);
    context.move_to(x, text.y - baseline);
    pangocairo::functions::show_layout(context, &layout);
}

fn font_description(font_size_px: f64, typeface: &Typeface) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(if typeface.family.is_empty() {
        "Sans"
    } else {
        typeface.family.as_str()
    });
    description.set_weight(if typeface.bold {
        pango::Weight::Bold
    } else {
        pango::Weight::Normal
    });
    description.set_absolute_size(font_size_px * f64::from(pango::SCALE));
    description
}

fn effective_stroke(stroke_width: f64) -> f64 {
    if stroke_width > 0.0 { stroke_width } else { 1.0 }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
