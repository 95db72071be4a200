use page_motion::counter::{ease_out_quart, format_value, group_thousands, parse_target};
use proptest::prelude::*;

fn naive_grouping(value: i64) -> String {
    let digits: Vec<char> = value.unsigned_abs().to_string().chars().rev().collect();
    let mut out = String::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    if value < 0 {
        out.push('-');
    }
    out.chars().rev().collect()
}

proptest! {
    #[test]
    fn easing_stays_in_unit_range(p in -10.0f64..10.0) {
        let eased = ease_out_quart(p);
        prop_assert!((0.0..=1.0).contains(&eased));
    }

    #[test]
    fn easing_is_monotone(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ease_out_quart(lo) <= ease_out_quart(hi));
    }

    #[test]
    fn easing_never_overshoots_target(target in 0.0f64..1e9, p in 0.0f64..1.0) {
        prop_assert!(target * ease_out_quart(p) <= target);
    }

    #[test]
    fn grouping_matches_reference(value in -1_000_000_000i64..1_000_000_000) {
        prop_assert_eq!(group_thousands(value), naive_grouping(value));
    }

    #[test]
    fn grouping_round_trips_through_parse(value in 0i64..1_000_000_000) {
        let grouped = group_thousands(value);
        prop_assert_eq!(parse_target(&grouped), Some(value as f64));
    }

    #[test]
    fn parse_accepts_decorated_integers(
        value in 0u64..100_000_000,
        prefix in "[ $€A-Za-z]{0,4}",
        suffix in "[ %+A-Za-z]{0,4}",
    ) {
        let text = format!("{prefix}{value}{suffix}");
        prop_assert_eq!(parse_target(&text), Some(value as f64));
    }

    #[test]
    fn parse_rejects_digitless_text(text in "[ a-zA-Z/%$+-]*") {
        prop_assert_eq!(parse_target(&text), None);
    }

    #[test]
    fn percent_format_keeps_one_decimal(value in 0.0f64..10_000.0) {
        let rendered = format_value(value, true);
        prop_assert!(rendered.ends_with('%'));
        let mantissa = &rendered[..rendered.len() - 1];
        let dot = mantissa.find('.').expect("decimal point");
        prop_assert_eq!(mantissa.len() - dot - 1, 1);
    }

    #[test]
    fn plain_format_is_floored(value in 0.0f64..1_000_000.0) {
        let rendered = format_value(value, false);
        let parsed = parse_target(&rendered).expect("formatted output parses");
        prop_assert_eq!(parsed, value.floor());
    }
}
