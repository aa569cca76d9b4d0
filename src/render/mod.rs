mod frame;
mod layer;
mod null_renderer;
mod primitives;
mod text;

pub use frame::{DrawCommand, LayeredCommand, RenderFrame};
pub use layer::DrawLayer;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPaint, ArcPrimitive, Color, FontMetrics, LinePrimitive, PointPrimitive, RectPrimitive,
    RectStyle, SweepGradient, TextBounds, TextHAlign, TextPrimitive, Typeface,
};
pub use text::{HeuristicTextMeasurer, TextMeasurer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
