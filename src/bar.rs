//! Proportional dwell-time bar

const FILLED: char = '█';
const EMPTY: char = '░';

/// Fraction of the full bar that `value` occupies, in `[0, 1]`.
///
/// `max == 0` yields 0.0 and values above `max` are clamped to 1.0.
pub fn bar_width_fraction(value: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(max)).clamp(0.0, 1.0)
}

/// Fixed-width text bar, `width` cells wide, filled cells rounded to nearest.
pub fn render_bar(value: u32, max: u32, width: usize) -> String {
    let filled = (bar_width_fraction(value, max) * width as f64).round() as usize;
    let filled = filled.min(width);

    let mut bar = String::with_capacity(width.saturating_mul(FILLED.len_utf8()));
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar
}

pub fn days_label(days: u32) -> String {
    format!("{days} Tage")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_full_and_half() {
        assert_eq!(bar_width_fraction(30, 30), 1.0);
        assert_eq!(bar_width_fraction(15, 30), 0.5);
        assert_eq!(bar_width_fraction(0, 30), 0.0);
    }

    #[test]
    fn test_zero_max_is_defined() {
        assert_eq!(bar_width_fraction(0, 0), 0.0);
        assert_eq!(bar_width_fraction(12, 0), 0.0);
    }

    #[test]
    fn test_clamps_above_max() {
        assert_eq!(bar_width_fraction(45, 30), 1.0);
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(30, 30, 4), "████");
        assert_eq!(render_bar(15, 30, 4), "██░░");
        assert_eq!(render_bar(20, 30, 3), "██░");
        assert_eq!(render_bar(5, 0, 3), "░░░");
        assert_eq!(render_bar(5, 10, 0), "");
    }

    #[test]
    fn test_days_label() {
        assert_eq!(days_label(30), "30 Tage");
    }

    quickcheck! {
        fn prop_fraction_in_unit_interval(value: u32, max: u32) -> bool {
            let f = bar_width_fraction(value, max);
            (0.0..=1.0).contains(&f)
        }

        fn prop_rendered_bar_has_requested_width(value: u32, max: u32, width: u8) -> bool {
            render_bar(value, max, width as usize).chars().count() == width as usize
        }
    }
}
