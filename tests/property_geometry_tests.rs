use minichart::core::DataPoint;
use minichart::core::geometry::{
    chord_length, normalize_angle_180, normalize_angle_360, point_on_circle,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_angle_360_stays_in_range(theta in -1.0e9f64..1.0e9) {
        let reduced = normalize_angle_360(theta);
        prop_assert!((0.0..360.0).contains(&reduced));
    }

    #[test]
    fn normalize_angle_360_is_periodic(theta in -10_000.0f64..10_000.0, turns in -50i32..50) {
        let shifted = theta + f64::from(turns) * 360.0;
        let delta = (normalize_angle_360(theta) - normalize_angle_360(shifted)).abs();
        prop_assert!(delta < 1e-6 || (360.0 - delta) < 1e-6);
    }

    #[test]
    fn normalize_angle_180_stays_in_range(theta in -1.0e9f64..1.0e9) {
        let reduced = normalize_angle_180(theta);
        prop_assert!((-180.0..=180.0).contains(&reduced));
    }

    #[test]
    fn chord_never_exceeds_diameter(radius in 0.001f64..10_000.0, factor in 0.0f64..0.999) {
        let chord = chord_length(radius, radius * factor).expect("distance inside circle");
        prop_assert!(chord > 0.0);
        prop_assert!(chord <= 2.0 * radius * (1.0 + 1e-12));
    }

    #[test]
    fn points_on_circle_keep_their_distance(
        degrees in -720.0f64..720.0,
        radius in 0.0f64..5_000.0,
    ) {
        let center = DataPoint::new(250.0, -40.0);
        let point = point_on_circle(center, degrees, radius);
        let distance = ((point.x - center.x).powi(2) + (point.y - center.y).powi(2)).sqrt();
        prop_assert!((distance - radius).abs() <= 1e-9 * radius.max(1.0));
    }
}
