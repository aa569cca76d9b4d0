use minichart::core::DataPoint;
use minichart::core::geometry::{chord_length, inscribed_square};
use minichart::core::label_fit::{
    ChordRegion, FALLBACK_LABEL_FONT_SIZE_PX, MIN_FONT_SIZE_PX, fit_labels_to_width, fit_to_chord,
};
use minichart::render::{HeuristicTextMeasurer, TextMeasurer, Typeface};
use proptest::prelude::*;

proptest! {
    #[test]
    fn multi_label_fit_never_exceeds_slot(
        labels in prop::collection::vec("[a-z0-9$]{1,12}", 1..12),
        slot_width in 5.0f64..400.0,
        scale in 1.0f64..100.0,
    ) {
        let measurer = HeuristicTextMeasurer::default();
        let typeface = Typeface::default();
        let metrics = fit_labels_to_width(
            &measurer,
            labels.iter().map(String::as_str),
            &typeface,
            slot_width,
            100.0,
            scale,
        );

        for label in &labels {
            let width = measurer.measure_text(label, metrics.font_size, &typeface).width;
            prop_assert!(
                width <= slot_width * (1.0 + 1e-9) || metrics.font_size == MIN_FONT_SIZE_PX
            );
        }
    }

    #[test]
    fn chord_fit_stays_inside_circle(
        text in "[A-Za-z0-9/ ]{1,16}",
        radius in 2.0f64..600.0,
        bold in any::<bool>(),
    ) {
        prop_assume!(!text.trim().is_empty());
        let measurer = HeuristicTextMeasurer::default();
        let typeface = Typeface::default().with_bold(bold);
        let region = ChordRegion {
            radius,
            inscribed: inscribed_square(DataPoint::new(0.0, 0.0), radius),
        };

        let metrics = fit_to_chord(&measurer, &text, &typeface, region, 100.0);
        prop_assert!(metrics.font_size > 0.0);
        if metrics.font_size != FALLBACK_LABEL_FONT_SIZE_PX {
            let width = measurer.measure_text(&text, metrics.font_size, &typeface).width;
            let chord = chord_length(radius, metrics.line_height / 2.0).expect("inside circle");
            prop_assert!(width <= chord * (1.0 + 1e-9));
            prop_assert!(metrics.line_height <= region.inscribed.height() * (1.0 + 1e-9));
        }
    }
}
