//! Font-size search that fits label text into the space a layout leaves for it.
//!
//! Every strategy returns [`LabelMetrics`] measured at the final size. Text
//! width is assumed to grow linearly with the font size, which holds for the
//! outline rasterizers the backends use.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::Rect;
use crate::core::geometry::chord_length;
use crate::render::{TextMeasurer, Typeface};

/// Smallest font size any strategy will return.
pub const MIN_FONT_SIZE_PX: f64 = 0.1;

/// Size used when a ring label cannot fit the circle at any size.
pub const FALLBACK_LABEL_FONT_SIZE_PX: f64 = 1.0;

/// Default start size for axis label searches.
pub const AXIS_LABEL_START_SIZE_PX: f64 = 100.0;

/// Start size of the ring label search.
pub const CHORD_FIT_START_SIZE_PX: f64 = 250.0;

const CHORD_SEARCH_MAX_ROUNDS: usize = 16;
const CHORD_SEARCH_TOLERANCE: f64 = 1e-3;

/// Font size plus the vertical space a line of text needs at that size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub font_size: f64,
    /// Ascent-to-descent span.
    pub line_height: f64,
    /// Baseline-to-bottom distance.
    pub descent: f64,
}

impl LabelMetrics {
    /// Metrics used for labels with no text.
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            font_size: 10.0,
            line_height: 10.0,
            descent: 1.0,
        }
    }

    /// Measures the font at `font_size` (clamped to a positive size).
    #[must_use]
    pub fn measure(measurer: &dyn TextMeasurer, font_size: f64, typeface: &Typeface) -> Self {
        let font_size = clamp_font_size(font_size);
        let metrics = measurer.font_metrics(font_size, typeface);
        Self {
            font_size,
            line_height: metrics.line_height(),
            descent: metrics.descent,
        }
    }
}

/// Circle a label is centered in, with the square inscribed in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordRegion {
    pub radius: f64,
    pub inscribed: Rect,
}

/// Scales `start_size` so `text` spans `target_width`.
///
/// One linear step: measure once, then scale by `target / measured`.
#[must_use]
pub fn fit_to_width(
    measurer: &dyn TextMeasurer,
    text: &str,
    typeface: &Typeface,
    target_width: f64,
    start_size: f64,
) -> LabelMetrics {
    let start_size = clamp_font_size(start_size);
    let measured = measurer.measure_text(text, start_size, typeface).width;
    if measured <= 0.0 || !measured.is_finite() {
        return LabelMetrics::measure(measurer, start_size, typeface);
    }

    let metrics = LabelMetrics::measure(measurer, start_size * (target_width / measured), typeface);
    trace!(font_size = metrics.font_size, target_width, "fit label to width");
    metrics
}

/// Finds one font size at which every non-blank label fits `slot_width`.
///
/// The binding label is the one with the smallest `slot / measured` ratio, so
/// the order of `labels` does not matter. `scale_percent` then shrinks the
/// result further (see [`apply_scale_percent`]).
#[must_use]
pub fn fit_labels_to_width<'a>(
    measurer: &dyn TextMeasurer,
    labels: impl IntoIterator<Item = &'a str>,
    typeface: &Typeface,
    slot_width: f64,
    start_size: f64,
    scale_percent: f64,
) -> LabelMetrics {
    let start_size = clamp_font_size(start_size);
    let min_scale = labels
        .into_iter()
        .filter(|label| !label.trim().is_empty())
        .filter_map(|label| {
            let width = measurer.measure_text(label, start_size, typeface).width;
            (width > 0.0 && width.is_finite()).then(|| slot_width / width)
        })
        .fold(None, |min: Option<f64>, scale| {
            Some(min.map_or(scale, |current| current.min(scale)))
        });

    let size = apply_scale_percent(start_size * min_scale.unwrap_or(1.0), scale_percent);
    let metrics = LabelMetrics::measure(measurer, size, typeface);
    trace!(font_size = metrics.font_size, slot_width, "fit labels to slot width");
    metrics
}

/// Scales `start_size` so one line of text is `band_height` tall.
#[must_use]
pub fn fit_to_height(
    measurer: &dyn TextMeasurer,
    typeface: &Typeface,
    band_height: f64,
    start_size: f64,
    scale_percent: f64,
) -> LabelMetrics {
    let start_size = clamp_font_size(start_size);
    let line_height = measurer.font_metrics(start_size, typeface).line_height();
    let size = if line_height > 0.0 {
        start_size * (band_height / line_height)
    } else {
        start_size
    };

    LabelMetrics::measure(measurer, apply_scale_percent(size, scale_percent), typeface)
}

/// Largest size at which `text` fits both `width` and `height`.
#[must_use]
pub fn fit_to_rect(
    measurer: &dyn TextMeasurer,
    text: &str,
    typeface: &Typeface,
    width: f64,
    height: f64,
    start_size: f64,
) -> LabelMetrics {
    let start_size = clamp_font_size(start_size);
    let measured = measurer.measure_text(text, start_size, typeface).width;
    let line_height = measurer.font_metrics(start_size, typeface).line_height();

    let mut scale: Option<f64> = None;
    if measured > 0.0 {
        scale = Some(width / measured);
    }
    if line_height > 0.0 {
        let by_height = height / line_height;
        scale = Some(scale.map_or(by_height, |current| current.min(by_height)));
    }

    LabelMetrics::measure(measurer, start_size * scale.unwrap_or(1.0), typeface)
}

/// Fits `text` centered in a circle.
///
/// Near the top and bottom of a circle the available width is the chord at
/// the text's half height, not the bounding box width. Starting from
/// [`CHORD_FIT_START_SIZE_PX`] fitted to the diameter, the search bisects on
/// the font size (at most 16 rounds, until the bracket is within 0.1%) for
/// the largest size whose measured width fits that chord. It then shrinks
/// uniformly if the line is taller than the inscribed square and finally
/// applies `scale_percent`.
///
/// A circle too small to hold even the smallest font yields a label at
/// [`FALLBACK_LABEL_FONT_SIZE_PX`].
#[must_use]
pub fn fit_to_chord(
    measurer: &dyn TextMeasurer,
    text: &str,
    typeface: &Typeface,
    region: ChordRegion,
    scale_percent: f64,
) -> LabelMetrics {
    if text.trim().is_empty() {
        return LabelMetrics::fallback();
    }

    let fits = |size: f64| -> Option<bool> {
        let half_height = measurer.font_metrics(size, typeface).line_height() / 2.0;
        let width = measurer.measure_text(text, size, typeface).width;
        chord_length(region.radius, half_height)
            .ok()
            .map(|chord| width <= chord)
    };

    if fits(MIN_FONT_SIZE_PX) != Some(true) {
        warn!(
            radius = region.radius,
            "label does not fit ring at minimum size, using fallback size"
        );
        return LabelMetrics::measure(measurer, FALLBACK_LABEL_FONT_SIZE_PX, typeface);
    }

    // the chord never exceeds the diameter, so this size is an upper bound
    let mut high = fit_to_width(
        measurer,
        text,
        typeface,
        region.radius * 2.0,
        CHORD_FIT_START_SIZE_PX,
    )
    .font_size;
    let mut low = MIN_FONT_SIZE_PX;
    if fits(high) == Some(true) {
        low = high;
    }

    for _ in 0..CHORD_SEARCH_MAX_ROUNDS {
        if high - low <= high * CHORD_SEARCH_TOLERANCE {
            break;
        }
        let mid = (low + high) / 2.0;
        if fits(mid) == Some(true) {
            low = mid;
        } else {
            high = mid;
        }
    }

    let mut size = low;
    let line_height = measurer.font_metrics(size, typeface).line_height();
    let max_height = region.inscribed.height();
    if line_height > max_height && line_height > 0.0 {
        size *= max_height / line_height;
    }

    let metrics =
        LabelMetrics::measure(measurer, apply_scale_percent(size, scale_percent), typeface);
    trace!(
        font_size = metrics.font_size,
        radius = region.radius,
        "fit label to chord"
    );
    metrics
}

/// Applies a user font scale given in percent.
///
/// Only `(0, 100]` is meaningful; anything else leaves the size untouched.
#[must_use]
pub fn apply_scale_percent(size: f64, scale_percent: f64) -> f64 {
    if scale_percent > 0.0 && scale_percent <= 100.0 {
        size * (scale_percent / 100.0)
    } else {
        size
    }
}

/// Keeps a computed font size usable.
///
/// A non-positive size means the layout left no room; that is recoverable, so
/// the minimum size is substituted.
#[must_use]
pub fn clamp_font_size(size: f64) -> f64 {
    if !size.is_finite() || size <= 0.0 {
        warn!(size, "computed font size is not positive, using minimum");
        return MIN_FONT_SIZE_PX;
    }
    size.max(MIN_FONT_SIZE_PX)
}
