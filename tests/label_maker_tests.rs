use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use minichart::core::label_maker::{currency_y_labels, month_labels, round_to_scale};

#[test]
fn round_to_scale_rounds_to_powers_of_ten() {
    assert_abs_diff_eq!(round_to_scale(1_234.5, 1).expect("round"), 1_230.0);
    assert_abs_diff_eq!(round_to_scale(1_234.5, 2).expect("round"), 1_200.0);
    assert_abs_diff_eq!(round_to_scale(15.0, 1).expect("round"), 20.0);
}

#[test]
fn round_to_scale_midpoints_move_away_from_zero() {
    assert_abs_diff_eq!(round_to_scale(2.5, 0).expect("round"), 3.0);
    assert_abs_diff_eq!(round_to_scale(-2.5, 0).expect("round"), -3.0);
    assert_abs_diff_eq!(round_to_scale(-15.0, 1).expect("round"), -20.0);
}

#[test]
fn negative_scale_rounds_to_integers() {
    assert_abs_diff_eq!(round_to_scale(2.4, -2).expect("round"), 2.0);
}

#[test]
fn non_finite_values_cannot_be_rounded() {
    assert!(round_to_scale(f64::NAN, 0).is_err());
}

#[test]
fn currency_labels_include_bounds_and_floored_ticks() {
    let labels = currency_y_labels(0.0, 10.0, 3);
    let texts: Vec<_> = labels.iter().map(|label| label.text()).collect();
    assert_eq!(texts, ["$0", "$10", "$7", "$5", "$2"]);

    let locations: Vec<_> = labels.iter().map(|label| label.location).collect();
    assert_eq!(locations, [0.0, 10.0, 7.0, 5.0, 2.0]);
    assert!(labels.iter().all(|label| label.draw_gridline));
}

#[test]
fn currency_labels_without_divisions_hold_bounds_only() {
    let labels = currency_y_labels(100.0, 250.0, 0);
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[1].text(), "$250");
}

#[test]
fn month_labels_count_up_across_year_end() {
    let start = NaiveDate::from_ymd_opt(2023, 11, 17).expect("date");
    let end = NaiveDate::from_ymd_opt(2024, 2, 3).expect("date");

    let labels = month_labels(start, end).expect("labels");
    let texts: Vec<_> = labels.iter().map(|label| label.text()).collect();
    assert_eq!(texts, ["nov", "dec", "jan", "feb"]);
    let locations: Vec<_> = labels.iter().map(|label| label.location).collect();
    assert_eq!(locations, [11.0, 12.0, 13.0, 14.0]);
}

#[test]
fn reversed_month_range_is_empty() {
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
    let end = NaiveDate::from_ymd_opt(2024, 3, 1).expect("date");
    assert!(month_labels(start, end).expect("labels").is_empty());
}
