//! Hit testing properties over the monospace reference measurer.

use core_layout::{
    MonospaceMeasurer, TextMeasurementPort, TextStyle, UNIT_SCALE, Wrap, locate,
};
use proptest::prelude::*;

fn style() -> TextStyle {
    TextStyle {
        font_size: 14,
        line_height: 18,
        wrap: Wrap::Char,
    }
}

proptest! {
    #[test]
    fn caret_is_monotonic_in_x_on_a_line(
        text in "[a-z漢 ]{1,24}",
        xs in proptest::collection::vec(-50i32..400, 2..16),
    ) {
        let m = MonospaceMeasurer::new(9.0);
        let layout = m.measure(&text, None, &style());
        let mut xs: Vec<i32> = xs.into_iter().map(|x| x * UNIT_SCALE).collect();
        xs.sort_unstable();
        let y = 9 * UNIT_SCALE;
        let mut previous = 0usize;
        for x in xs {
            let caret = locate(&m, &layout, x, y).unwrap().caret();
            prop_assert!(caret >= previous);
            previous = caret;
        }
    }

    #[test]
    fn caret_is_monotonic_in_y(
        text in "[a-z\n]{0,40}",
        ys in proptest::collection::vec(-100i32..400, 2..16),
    ) {
        let m = MonospaceMeasurer::new(9.0);
        let layout = m.measure(&text, Some(60 * UNIT_SCALE), &style());
        let mut ys: Vec<i32> = ys.into_iter().map(|y| y * UNIT_SCALE).collect();
        ys.sort_unstable();
        let mut previous = 0usize;
        for y in ys {
            let caret = locate(&m, &layout, 5 * UNIT_SCALE, y).unwrap().caret();
            prop_assert!(caret >= previous);
            previous = caret;
        }
    }

    #[test]
    fn clamps_outside_the_text(text in "[a-z \n漢]{0,40}", x in -1000i32..1000) {
        let m = MonospaceMeasurer::new(9.0);
        let layout = m.measure(&text, Some(80 * UNIT_SCALE), &style());
        let len = text.chars().count();
        let height = layout.height();

        let above = locate(&m, &layout, x * UNIT_SCALE, -UNIT_SCALE).unwrap();
        prop_assert_eq!(above.caret(), 0);

        let below = locate(&m, &layout, x * UNIT_SCALE, height).unwrap();
        prop_assert_eq!(below.caret(), len);

        let inside = locate(&m, &layout, x * UNIT_SCALE, height / 2).unwrap();
        prop_assert!(inside.caret() <= len);
    }
}
