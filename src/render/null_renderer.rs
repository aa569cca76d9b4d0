use crate::error::ChartResult;
use crate::render::{
    FontMetrics, HeuristicTextMeasurer, RenderFrame, Renderer, TextBounds, TextMeasurer, Typeface,
};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced, and measures text with
/// [`HeuristicTextMeasurer`].
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub measurer: HeuristicTextMeasurer,
    pub frames_rendered: usize,
    pub last_command_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_command_count = frame.len();
        self.last_text_count = frame.texts().count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

impl TextMeasurer for NullRenderer {
    fn measure_text(&self, text: &str, font_size_px: f64, typeface: &Typeface) -> TextBounds {
        self.measurer.measure_text(text, font_size_px, typeface)
    }

    fn font_metrics(&self, font_size_px: f64, typeface: &Typeface) -> FontMetrics {
        self.measurer.font_metrics(font_size_px, typeface)
    }
}
