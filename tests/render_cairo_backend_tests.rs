#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use minichart::ChartError;
use minichart::api::{
    BarChart, BarChartConfig, Chart, ChartView, RenderPassOutcome, RingLabel, RingMeter,
    RingMeterConfig, RingMeterMode,
};
use minichart::core::{GraphEntry, Viewport};
use minichart::render::{CairoContextRenderer, CairoRenderer, TextMeasurer, Typeface};

fn sample_bars() -> BarChart {
    let entries = [(8.0, 10.0), (15.0, 9.0), (3.0, 11.0)]
        .into_iter()
        .zip(["jan", "feb", "mar"])
        .map(|((value, threshold), month)| GraphEntry::new(value, threshold).with_label(month))
        .collect();
    BarChart::new(BarChartConfig::default().with_axes(true, true), entries)
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn pango_measurement_grows_with_font_size() {
    let renderer = CairoRenderer::new(200, 100).expect("renderer");
    let typeface = Typeface::default();

    let small = renderer.measure_text("16/12", 10.0, &typeface);
    let large = renderer.measure_text("16/12", 40.0, &typeface);
    assert!(small.width > 0.0);
    assert!(large.width > small.width);

    let metrics = renderer.font_metrics(40.0, &typeface);
    assert!(metrics.ascent > 0.0 && metrics.descent > 0.0);
}

#[test]
fn cairo_view_renders_bar_chart() {
    let renderer = CairoRenderer::new(600, 200).expect("renderer");
    let mut view = ChartView::new(sample_bars(), renderer, Viewport::new(600, 200));

    assert_eq!(view.render_pass().expect("pass"), RenderPassOutcome::Rendered);
    let stats = view.renderer().last_stats();
    assert_eq!(stats.rects_drawn, 6);
    assert_eq!(stats.lines_drawn, 2);
    assert_eq!(stats.texts_drawn, 3);
}

#[test]
fn cairo_renderer_draws_ring_on_external_context() {
    let mut renderer = CairoRenderer::new(300, 300).expect("renderer");
    let chart = RingMeter::new(
        RingMeterConfig::default()
            .with_mode(RingMeterMode::Progress {
                value: 16.0,
                goal: 12.0,
            })
            .with_labels(RingLabel::new("16/12"), RingLabel::new("subby label")),
    );
    let frame = chart
        .build_render_frame(Viewport::new(300, 300), &renderer)
        .expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 300, 300).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on external context");

    let stats = renderer.last_stats();
    assert_eq!(stats.arcs_drawn, 2);
    assert_eq!(stats.points_drawn, 2);
    assert_eq!(stats.texts_drawn, 2);
}

#[test]
fn png_export_writes_signature() {
    let mut view = ChartView::new(
        sample_bars(),
        CairoRenderer::new(320, 160).expect("renderer"),
        Viewport::new(320, 160),
    );
    view.render_pass().expect("pass");

    let mut bytes = Vec::new();
    view.renderer().write_png(&mut bytes).expect("png");
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
