use approx::assert_abs_diff_eq;
use minichart::api::{
    BarChart, BarChartConfig, Chart, ColumnBars, ColumnPaint, HORIZONTAL_SCALE_LINES,
    MAX_LABEL_BAND_SHARE, PLACEHOLDER_DOT_DIAMETER, max_bar_value,
};
use minichart::core::{GraphEntry, Viewport};
use minichart::render::{Color, DrawCommand, DrawLayer, HeuristicTextMeasurer, TextMeasurer};

const VALUE_COLOR: Color = Color::rgb(1.0, 0.0, 0.0);
const THRESHOLD_COLOR: Color = Color::rgb(0.0, 0.0, 1.0);

fn monthly_entries() -> Vec<GraphEntry> {
    [(8.0, 10.0), (15.0, 9.0), (3.0, 11.0), (10.0, 10.0), (0.0, 7.0), (17.0, 15.0)]
        .into_iter()
        .zip(["jan", "feb", "mar", "apr", "may", "jun"])
        .map(|((value, threshold), month)| {
            GraphEntry::new(value, threshold)
                .with_label(month)
                .with_colors(VALUE_COLOR, THRESHOLD_COLOR)
        })
        .collect()
}

#[test]
fn monthly_scenario_lays_out_six_slots() {
    let measurer = HeuristicTextMeasurer::default();
    let chart = BarChart::new(BarChartConfig::default(), monthly_entries());
    let viewport = Viewport::new(600, 200);

    let metrics = chart.x_label_metrics(viewport, &measurer);
    let frames = chart.frames(viewport, metrics).expect("layout");

    assert_eq!(frames.slots.len(), 6);
    for slot in &frames.slots {
        assert_abs_diff_eq!(slot.frame.width(), 100.0, epsilon = 0.5);
    }
    let total: f64 = frames.slots.iter().map(|slot| slot.frame.width()).sum();
    assert_abs_diff_eq!(total, frames.bar_frame.width(), epsilon = 1e-9);
}

#[test]
fn monthly_scenario_paint_order() {
    let measurer = HeuristicTextMeasurer::default();
    let entries = monthly_entries();
    let chart = BarChart::new(BarChartConfig::default(), entries.clone());
    let frame = chart
        .build_render_frame(Viewport::new(600, 200), &measurer)
        .expect("frame");
    frame.validate().expect("valid frame");

    let expected = [
        ColumnPaint::GoalMissed,
        ColumnPaint::GoalReached,
        ColumnPaint::GoalMissed,
        ColumnPaint::GoalReached,
        ColumnPaint::GoalMissed,
        ColumnPaint::GoalReached,
    ];
    let paints: Vec<_> = entries.iter().map(ColumnPaint::of).collect();
    assert_eq!(paints, expected);

    let rects: Vec<_> = frame.rects().collect();
    assert_eq!(rects.len(), 12);
    for (column, paint) in expected.iter().enumerate() {
        let (bottom, top) = (rects[column * 2], rects[column * 2 + 1]);
        match paint {
            ColumnPaint::GoalReached => {
                assert_eq!(bottom.color, VALUE_COLOR);
                assert_eq!(top.color, THRESHOLD_COLOR);
            }
            ColumnPaint::GoalMissed => {
                assert_eq!(bottom.color, THRESHOLD_COLOR);
                assert_eq!(top.color, VALUE_COLOR);
            }
            ColumnPaint::Placeholder => unreachable!("no empty entries"),
        }
    }
}

#[test]
fn bar_heights_scale_to_largest_value_or_threshold() {
    let measurer = HeuristicTextMeasurer::default();
    let entries = monthly_entries();
    let chart = BarChart::new(BarChartConfig::default(), entries.clone());
    let viewport = Viewport::new(600, 200);
    let frames = chart
        .frames(viewport, chart.x_label_metrics(viewport, &measurer))
        .expect("layout");

    assert_eq!(max_bar_value(&entries), 17.0);
    let height = frames.bar_frame.height();

    let june = ColumnBars::compute(&frames.slots[5], &entries[5], 17.0, 0.0);
    assert_abs_diff_eq!(june.value.height(), height, epsilon = 1e-9);
    assert_abs_diff_eq!(june.value.bottom, frames.bar_frame.bottom, epsilon = 1e-9);

    let february = ColumnBars::compute(&frames.slots[1], &entries[1], 17.0, 0.0);
    assert_abs_diff_eq!(february.value.height(), height * 15.0 / 17.0, epsilon = 1e-9);
    assert_abs_diff_eq!(february.threshold.height(), height * 9.0 / 17.0, epsilon = 1e-9);

    let may = ColumnBars::compute(&frames.slots[4], &entries[4], 17.0, 0.0);
    assert_abs_diff_eq!(may.value.height(), 0.0, epsilon = 1e-9);
}

#[test]
fn zero_maximum_gives_flat_bars() {
    let measurer = HeuristicTextMeasurer::default();
    let chart = BarChart::new(
        BarChartConfig::default(),
        vec![GraphEntry::new(0.0, 0.0), GraphEntry::new(-5.0, f64::NAN)],
    );
    let frame = chart
        .build_render_frame(Viewport::new(200, 100), &measurer)
        .expect("frame");
    frame.validate().expect("finite geometry");
    assert!(frame.rects().all(|rect| rect.rect.height() == 0.0));
}

#[test]
fn thickness_controls_bar_margins() {
    let measurer = HeuristicTextMeasurer::default();
    let viewport = Viewport::new(600, 200);
    let thin = BarChart::new(BarChartConfig::default().with_bar_thickness(0.0), monthly_entries());
    let thick = BarChart::new(
        BarChartConfig::default().with_bar_thickness(100.0),
        monthly_entries(),
    );

    let thin_width = thin
        .build_render_frame(viewport, &measurer)
        .expect("frame")
        .rects()
        .next()
        .expect("bar")
        .rect
        .width();
    let thick_width = thick
        .build_render_frame(viewport, &measurer)
        .expect("frame")
        .rects()
        .next()
        .expect("bar")
        .rect
        .width();

    let slot = 599.0 / 6.0;
    assert_abs_diff_eq!(thin_width, slot - 2.0 * slot / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(thick_width, slot - 2.0 * slot / 15.0, epsilon = 1e-9);
}

#[test]
fn empty_entry_draws_placeholder_dot() {
    let measurer = HeuristicTextMeasurer::default();
    let mut entries = monthly_entries();
    entries[2] = GraphEntry::placeholder().with_label("mar");
    let chart = BarChart::new(BarChartConfig::default(), entries);
    let viewport = Viewport::new(600, 200);
    let frames = chart
        .frames(viewport, chart.x_label_metrics(viewport, &measurer))
        .expect("layout");
    let frame = chart.build_render_frame(viewport, &measurer).expect("frame");

    let dots: Vec<_> = frame.points().collect();
    assert_eq!(dots.len(), 1);
    assert_abs_diff_eq!(dots[0].stroke_width, PLACEHOLDER_DOT_DIAMETER, epsilon = 1e-12);
    assert_abs_diff_eq!(dots[0].x, frames.slots[2].frame.mid_x(), epsilon = 1e-9);
    assert_abs_diff_eq!(
        dots[0].y,
        frames.slots[2].frame.bottom - PLACEHOLDER_DOT_DIAMETER,
        epsilon = 1e-9
    );
    assert_eq!(dots[0].color, chart.config.axis_color);
    assert_eq!(frame.rects().count(), 10);
}

#[test]
fn labels_fit_slot_and_sit_on_band_baseline() {
    let measurer = HeuristicTextMeasurer::default();
    let chart = BarChart::new(BarChartConfig::default(), monthly_entries());
    let viewport = Viewport::new(600, 200);
    let metrics = chart.x_label_metrics(viewport, &measurer);
    let frames = chart.frames(viewport, metrics).expect("layout");
    let frame = chart.build_render_frame(viewport, &measurer).expect("frame");

    let labels: Vec<_> = frame.texts().collect();
    assert_eq!(labels.len(), 6);
    for (label, slot) in labels.iter().zip(&frames.slots) {
        let width = measurer
            .measure_text(&label.text, label.font_size_px, &label.typeface)
            .width;
        assert!(width <= slot.frame.width() + 1e-9);
        assert_abs_diff_eq!(label.x, slot.label_frame.mid_x(), epsilon = 1e-9);
        assert_abs_diff_eq!(label.y, slot.label_frame.bottom - metrics.descent, epsilon = 1e-9);
    }
}

#[test]
fn blank_labels_are_skipped() {
    let measurer = HeuristicTextMeasurer::default();
    let mut entries = monthly_entries();
    entries[0].label = "   ".to_owned();
    let chart = BarChart::new(BarChartConfig::default(), entries);
    let frame = chart
        .build_render_frame(Viewport::new(600, 200), &measurer)
        .expect("frame");
    assert_eq!(frame.texts().count(), 5);
}

#[test]
fn scale_lines_and_axes_are_optional() {
    let measurer = HeuristicTextMeasurer::default();
    let viewport = Viewport::new(600, 200);

    let plain = BarChart::new(BarChartConfig::default(), monthly_entries())
        .build_render_frame(viewport, &measurer)
        .expect("frame");
    assert_eq!(plain.layer(DrawLayer::Grid).count(), 0);

    let config = BarChartConfig::default()
        .with_horizontal_scale(true)
        .with_axes(true, true);
    let decorated = BarChart::new(config, monthly_entries())
        .build_render_frame(viewport, &measurer)
        .expect("frame");
    assert_eq!(
        decorated.layer(DrawLayer::Grid).count(),
        HORIZONTAL_SCALE_LINES as usize + 2
    );
    assert!(
        decorated
            .layer(DrawLayer::Grid)
            .all(|command| matches!(command, DrawCommand::Line(_)))
    );
}

#[test]
fn no_entries_still_lays_out_one_slot() {
    let measurer = HeuristicTextMeasurer::default();
    let chart = BarChart::default();
    let viewport = Viewport::new(300, 120);
    let metrics = chart.x_label_metrics(viewport, &measurer);
    assert_eq!(metrics.line_height, 0.0);

    let frames = chart.frames(viewport, metrics).expect("layout");
    assert_eq!(frames.slots.len(), 1);
    let frame = chart.build_render_frame(viewport, &measurer).expect("frame");
    assert_eq!(frame.len(), 1);
}

#[test]
fn layout_grid_frames_every_slot() {
    let measurer = HeuristicTextMeasurer::default();
    let mut config = BarChartConfig::default();
    config.layout_grid = true;
    let frame = BarChart::new(config, monthly_entries())
        .build_render_frame(Viewport::new(600, 200), &measurer)
        .expect("frame");
    assert_eq!(frame.layer(DrawLayer::Debug).count(), 2 + 6 * 2);
}

#[test]
fn short_wide_surface_shrinks_labels_to_keep_bars() {
    let measurer = HeuristicTextMeasurer::default();
    let chart = BarChart::new(BarChartConfig::default(), monthly_entries());
    let viewport = Viewport::new(600, 60);

    let metrics = chart.x_label_metrics(viewport, &measurer);
    // control height 59, breath 5
    assert!(metrics.line_height <= 54.0 * MAX_LABEL_BAND_SHARE + 1e-9);

    let frames = chart.frames(viewport, metrics).expect("layout");
    assert!(frames.bar_frame.height() >= 27.0 - 1e-9);

    let frame = chart.build_render_frame(viewport, &measurer).expect("frame");
    assert_eq!(frame.texts().count(), 6);
    // value and threshold bar per column
    assert_eq!(frame.rects().count(), 12);
    frame.validate().expect("valid frame");
}

#[test]
fn tall_surface_keeps_width_fitted_labels() {
    let measurer = HeuristicTextMeasurer::default();
    let chart = BarChart::new(BarChartConfig::default(), monthly_entries());
    let tall = chart.x_label_metrics(Viewport::new(600, 200), &measurer);
    let taller = chart.x_label_metrics(Viewport::new(600, 400), &measurer);
    assert_abs_diff_eq!(tall.font_size, taller.font_size, epsilon = 1e-9);
}
