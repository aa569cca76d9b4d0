#[cfg(feature = "cairo-backend")]
use minichart::api::{
    BarChart, BarChartConfig, Chart, ChartView, LineChart, LineChartConfig, RenderPassOutcome,
    RingLabel, RingMeter, RingMeterConfig, RingMeterMode,
};
#[cfg(feature = "cairo-backend")]
use minichart::core::label_maker::currency_y_labels;
#[cfg(feature = "cairo-backend")]
use minichart::core::{DataPoint, GraphEntry, LineLabel, LineSeries, Viewport};
#[cfg(feature = "cairo-backend")]
use minichart::render::{CairoRenderer, Color};
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_ROOT: &str = "target/gallery";

#[cfg(feature = "cairo-backend")]
const MONTHS: [&str; 6] = ["jan", "feb", "mar", "apr", "may", "jun"];

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = minichart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let output_root = parse_args()?;
    fs::create_dir_all(&output_root)
        .map_err(|err| format!("failed to create `{}`: {err}", output_root.display()))?;

    render_png(
        &output_root.join("line_chart.png"),
        sample_line_chart(),
        Viewport::new(400, 300),
    )?;
    render_png(
        &output_root.join("bar_chart.png"),
        sample_bar_chart(),
        Viewport::new(600, 200),
    )?;
    render_png(
        &output_root.join("ring_progress.png"),
        sample_ring(RingMeterMode::Progress {
            value: 16.0,
            goal: 12.0,
        }),
        Viewport::new(300, 300),
    )?;
    render_png(
        &output_root.join("ring_pie.png"),
        sample_ring(RingMeterMode::Pie {
            first: 16.0,
            second: 12.0,
        }),
        Viewport::new(300, 300),
    )?;

    println!("wrote gallery to {}", output_root.display());
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<PathBuf, String> {
    let mut output_root = PathBuf::from(DEFAULT_OUTPUT_ROOT);
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                let value = args.next().ok_or("missing value for --out")?;
                output_root = PathBuf::from(value);
            }
            "--help" | "-h" => {
                println!("usage: render_gallery_pngs [--out <dir>]");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(output_root)
}

#[cfg(feature = "cairo-backend")]
fn render_png(path: &Path, chart: impl Chart, viewport: Viewport) -> Result<(), String> {
    let width = i32::try_from(viewport.width).map_err(|err| err.to_string())?;
    let height = i32::try_from(viewport.height).map_err(|err| err.to_string())?;
    let renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;

    let mut view = ChartView::new(chart, renderer, viewport);
    match view.render_pass().map_err(|err| err.to_string())? {
        RenderPassOutcome::Rendered => {}
        outcome => return Err(format!("unexpected render outcome {outcome:?}")),
    }

    let mut file = File::create(path)
        .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
    view.renderer()
        .write_png(&mut file)
        .map_err(|err| err.to_string())
}

#[cfg(feature = "cairo-backend")]
fn sample_line_chart() -> LineChart {
    let mut chart = LineChart::new(LineChartConfig::default().with_x_range(0.0, 7.0));
    chart.config.background_color = Color::from_rgb8(30, 30, 30);
    chart.config.label_color = Color::rgb(1.0, 1.0, 1.0);
    chart.config.title_color = Color::rgb(1.0, 1.0, 1.0);
    chart.title = Some("monthly spend".to_owned());

    chart.series.push(
        LineSeries::new(
            [(1.0, 0.10), (2.0, 0.98), (3.0, 1.05), (4.0, 1.25), (5.0, 1.97), (6.0, 2.02)]
                .into_iter()
                .map(|(x, y)| DataPoint::new(x, y * 4.0))
                .collect(),
        )
        .with_color(Color::from_rgb8(0, 128, 0))
        .with_stroke_width(2.5),
    );
    chart.x_labels = MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| LineLabel::new(index as f64 + 1.0, month))
        .collect();
    chart.y_labels = currency_y_labels(0.0, 10.0, 3);
    chart
}

#[cfg(feature = "cairo-backend")]
fn sample_bar_chart() -> BarChart {
    let entries = [(8.0, 10.0), (15.0, 9.0), (3.0, 11.0), (10.0, 10.0), (0.0, 7.0), (17.0, 15.0)]
        .into_iter()
        .zip(MONTHS)
        .map(|((value, threshold), month)| GraphEntry::new(value, threshold).with_label(month))
        .collect();

    let mut config = BarChartConfig::default()
        .with_axes(true, true)
        .with_horizontal_scale(true);
    config.background_color = Color::from_rgb8(30, 30, 30);
    BarChart::new(config, entries)
}

#[cfg(feature = "cairo-backend")]
fn sample_ring(mode: RingMeterMode) -> RingMeter {
    let config = RingMeterConfig::default()
        .with_mode(mode)
        .with_labels(
            RingLabel::new("16/12").with_bold(true),
            RingLabel::new("subby label").with_font_scale(60.0),
        );
    RingMeter::new(RingMeterConfig {
        pie_handles: true,
        ..config
    })
}
