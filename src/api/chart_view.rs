use tracing::{debug, trace};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{Renderer, TextMeasurer};

use super::Chart;

/// Result of one [`ChartView::render_pass`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPassOutcome {
    /// A frame was built and handed to the renderer.
    Rendered,
    /// Nothing changed since the last rendered pass.
    Clean,
    /// The surface has no pixels; the chart stays dirty until resized.
    SkippedEmptySurface,
}

/// Owns a chart and its renderer and redraws only after invalidation.
///
/// Mutations go through [`ChartView::update`], which marks the view dirty once
/// per batch however many properties change.
#[derive(Debug)]
pub struct ChartView<C, R> {
    chart: C,
    renderer: R,
    viewport: Viewport,
    dirty: bool,
    passes_rendered: u64,
}

impl<C: Chart, R: Renderer + TextMeasurer> ChartView<C, R> {
    /// New views start dirty so the first pass draws.
    #[must_use]
    pub fn new(chart: C, renderer: R, viewport: Viewport) -> Self {
        Self {
            chart,
            renderer,
            viewport,
            dirty: true,
            passes_rendered: 0,
        }
    }

    #[must_use]
    pub fn chart(&self) -> &C {
        &self.chart
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn passes_rendered(&self) -> u64 {
        self.passes_rendered
    }

    /// Applies a batch of chart mutations and invalidates once.
    pub fn update<T>(&mut self, mutate: impl FnOnce(&mut C) -> T) -> T {
        let out = mutate(&mut self.chart);
        self.invalidate();
        out
    }

    pub fn invalidate(&mut self) {
        if !self.dirty {
            trace!(kind = self.chart.kind(), "chart invalidated");
        }
        self.dirty = true;
    }

    /// Invalidates only when the size actually changed.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.invalidate();
        }
    }

    /// Runs one full layout and draw pass if the view is dirty.
    ///
    /// On error the view stays dirty so the next pass retries.
    pub fn render_pass(&mut self) -> ChartResult<RenderPassOutcome> {
        if !self.dirty {
            return Ok(RenderPassOutcome::Clean);
        }
        if !self.viewport.is_valid() {
            debug!(
                kind = self.chart.kind(),
                width = self.viewport.width,
                height = self.viewport.height,
                "skipping render pass on empty surface"
            );
            return Ok(RenderPassOutcome::SkippedEmptySurface);
        }

        let frame = self.chart.build_render_frame(self.viewport, &self.renderer)?;
        self.renderer.render(&frame)?;
        self.dirty = false;
        self.passes_rendered += 1;

        debug!(
            kind = self.chart.kind(),
            width = self.viewport.width,
            height = self.viewport.height,
            commands = frame.len(),
            "render pass complete"
        );
        Ok(RenderPassOutcome::Rendered)
    }

    #[must_use]
    pub fn into_parts(self) -> (C, R) {
        (self.chart, self.renderer)
    }
}
