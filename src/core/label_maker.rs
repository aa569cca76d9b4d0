//! Helpers that generate common tick label sets for line charts.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::LineLabel;
use crate::error::{ChartError, ChartResult};

/// Rounds `value` to the nearest multiple of `10^scale`, midpoints away from zero.
///
/// Negative scales are treated as zero.
pub fn round_to_scale(value: f64, scale: i32) -> ChartResult<f64> {
    let exponent = u32::try_from(scale.max(0)).unwrap_or(0);
    let factor = 10_u64
        .checked_pow(exponent)
        .map(Decimal::from)
        .ok_or_else(|| ChartError::InvalidData(format!("rounding scale {scale} is too large")))?;
    let decimal = Decimal::from_f64(value).ok_or_else(|| {
        ChartError::InvalidData(format!("{value} cannot be represented as a decimal"))
    })?;

    let rounded = (decimal / factor)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * factor;
    rounded
        .to_f64()
        .ok_or_else(|| {
            ChartError::InvalidData("rounded value cannot be represented as f64".to_owned())
        })
}

/// Dollar-formatted Y ticks: both bounds plus `divisions` floored interior ticks.
#[must_use]
pub fn currency_y_labels(min: f64, max: f64, divisions: u32) -> Vec<LineLabel> {
    let mut labels = Vec::with_capacity(divisions as usize + 2);
    labels.push(LineLabel::new(min, &format!("${min}")));
    labels.push(LineLabel::new(max, &format!("${max}")));

    let span = (max - min) / f64::from(divisions + 1);
    for step in (1..=divisions).rev() {
        let tick = (min + span * f64::from(step)).floor();
        labels.push(LineLabel::new(tick, &format!("${tick}")));
    }

    labels
}

/// One lowercase month-name tick per month from `start` to `end` inclusive.
///
/// Locations count up from the start month number, so a range crossing a year
/// keeps increasing (`dec` = 12, `jan` = 13).
pub fn month_labels(start: NaiveDate, end: NaiveDate) -> ChartResult<Vec<LineLabel>> {
    let first_of = |date: NaiveDate| {
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .ok_or_else(|| ChartError::InvalidData(format!("invalid month start for {date}")))
    };

    let end = first_of(end)?;
    let mut current = first_of(start)?;
    let mut location = f64::from(current.month());
    let mut labels = Vec::new();

    while current <= end {
        let text = current.format("%b").to_string().to_lowercase();
        labels.push(LineLabel::new(location, &text));
        current = current
            .checked_add_months(Months::new(1))
            .ok_or_else(|| ChartError::InvalidData("month range overflows calendar".to_owned()))?;
        location += 1.0;
    }

    Ok(labels)
}
