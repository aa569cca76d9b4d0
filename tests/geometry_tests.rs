use approx::assert_abs_diff_eq;
use minichart::ChartError;
use minichart::core::DataPoint;
use minichart::core::geometry::{
    chord_length, inscribed_square, normalize_angle_180, normalize_angle_360, point_on_circle,
    polar_to_cartesian,
};

#[test]
fn normalize_angle_360_reduces_large_negative_angles() {
    assert_abs_diff_eq!(normalize_angle_360(-1_677_831.26), 128.74, epsilon = 1e-6);
    assert_abs_diff_eq!(normalize_angle_360(720.0), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(normalize_angle_360(-90.0), 270.0, epsilon = 1e-9);
    assert_abs_diff_eq!(normalize_angle_360(475.714), 115.714, epsilon = 1e-9);
}

#[test]
fn normalize_angle_180_folds_upper_half() {
    assert_abs_diff_eq!(normalize_angle_180(270.0), -90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(normalize_angle_180(180.0), 180.0, epsilon = 1e-9);
    assert_abs_diff_eq!(normalize_angle_180(-190.0), 170.0, epsilon = 1e-9);
}

#[test]
fn chord_through_center_is_diameter() {
    let chord = chord_length(40.0, 0.0).expect("inside circle");
    assert_abs_diff_eq!(chord, 80.0, epsilon = 1e-9);
}

#[test]
fn chord_is_symmetric_in_distance() {
    let above = chord_length(10.0, 6.0).expect("inside circle");
    let below = chord_length(10.0, -6.0).expect("inside circle");
    assert_abs_diff_eq!(above, 16.0, epsilon = 1e-12);
    assert_abs_diff_eq!(above, below, epsilon = 1e-9);
}

#[test]
fn chord_outside_circle_is_rejected() {
    let err = chord_length(10.0, 10.0).expect_err("tangent line has no chord");
    assert!(matches!(err, ChartError::ChordOutOfDomain { .. }));
    assert!(chord_length(10.0, 12.5).is_err());
    assert!(chord_length(10.0, f64::NAN).is_err());
}

#[test]
fn screen_angles_run_clockwise_from_the_right() {
    let center = DataPoint::new(100.0, 100.0);

    let right = point_on_circle(center, 0.0, 50.0);
    assert_abs_diff_eq!(right.x, 150.0, epsilon = 1e-9);
    assert_abs_diff_eq!(right.y, 100.0, epsilon = 1e-9);

    let bottom = point_on_circle(center, 90.0, 50.0);
    assert_abs_diff_eq!(bottom.x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bottom.y, 150.0, epsilon = 1e-9);

    let top = point_on_circle(center, 270.0, 50.0);
    assert_abs_diff_eq!(top.y, 50.0, epsilon = 1e-9);
}

#[test]
fn polar_conversion_keeps_radius() {
    let (x, y) = polar_to_cartesian(1.234, 7.0);
    assert_abs_diff_eq!((x * x + y * y).sqrt(), 7.0, epsilon = 1e-12);
}

#[test]
fn inscribed_square_corners_touch_circle() {
    let center = DataPoint::new(0.0, 0.0);
    let square = inscribed_square(center, 10.0);
    let corner = (square.right * square.right + square.bottom * square.bottom).sqrt();
    assert_abs_diff_eq!(corner, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(square.width(), square.height(), epsilon = 1e-9);
}

#[test]
fn inscribed_square_of_empty_circle_is_a_point() {
    let square = inscribed_square(DataPoint::new(3.0, 4.0), -1.0);
    assert!(!square.has_area());
    assert_abs_diff_eq!(square.left, 3.0, epsilon = 1e-9);
}
