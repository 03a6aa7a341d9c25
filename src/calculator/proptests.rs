//! Property-based tests for the dosing chain

use super::*;
use proptest::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Every stage is derived from the previous unrounded stage
    #[test]
    fn prop_chain_consistency(volume in 0.0f64..1.0e9) {
        let raw = volume.to_string();
        let calc = compute(Some(&raw));
        let result = calc.result();

        let computed = matches!(calc, Calculation::Computed { .. });
        prop_assert!(computed, "expected a computed result, got {:?}", calc);
        prop_assert!(close(result.odorant_amount(), (volume / 1000.0) * 16.0));
        prop_assert!(close(result.drops(), result.odorant_amount() / 0.02));
        prop_assert!(close(result.drops_per_minute(), result.drops() / 60.0));
    }

    // All three fields are zero together or non-zero together
    #[test]
    fn prop_no_partial_results(volume in 0.0f64..1.0e6) {
        let result = compute(Some(&volume.to_string())).result();
        let zeros = [result.odorant_amount(), result.drops(), result.drops_per_minute()]
            .iter()
            .filter(|v| **v == 0.0)
            .count();
        prop_assert!(zeros == 0 || zeros == 3, "partial result {:?}", result);
    }

    // Arbitrary text never panics and never yields a result unless it parsed
    #[test]
    fn prop_arbitrary_text_is_safe(raw in "\\PC{0,12}") {
        let calc = compute(Some(&raw));
        match &calc {
            Calculation::Empty => prop_assert!(raw.trim().is_empty()),
            Calculation::Invalid { .. } => prop_assert!(calc.result().is_zero()),
            Calculation::Computed { input, .. } => prop_assert!(input.is_finite()),
        }
    }

    // Display is always two decimals
    #[test]
    fn prop_display_two_decimals(volume in 0.0f64..1.0e6) {
        let display = compute(Some(&volume.to_string())).result().display();
        for s in [&display.odorant_amount, &display.drops, &display.drops_per_minute] {
            let decimals = s.rsplit_once('.').map(|(_, d)| d.len());
            prop_assert_eq!(decimals, Some(2), "bad display {}", s);
        }
    }
}
