#![cfg(test)]

// Property tests for the contract checker kept inside the crate so they can
// grow checks against internals without feature gates.

use crate::contract::{check, Violation};
use crate::semantics::{FnSemantics, ValueSemantics};
use proptest::prelude::*;

// Property: a coherent Eq + Hash strategy never produces violations, for any
// sample set (including duplicates).
proptest! {
    #[test]
    fn prop_value_semantics_always_passes(
        samples in proptest::collection::vec("[a-c]{0,3}", 0..24)
    ) {
        let report = check(&ValueSemantics::new(), &samples);
        prop_assert!(report.is_ok(), "violations: {}", report);
        prop_assert_eq!(report.samples(), samples.len());
    }
}

// Property: equality-by-content paired with hashing that ignores part of the
// compared state is flagged with a hash mismatch exactly when the samples
// contain an equivalent pair whose ignored halves differ; it is never flagged
// for reflexivity, symmetry, or transitivity (the relation itself is sound).
proptest! {
    #[test]
    fn prop_partial_hash_flagged_iff_divergent_pair(
        samples in proptest::collection::vec((0u8..4, 0u8..4), 0..16)
    ) {
        // Equivalence looks at .0 only; the hash also mixes in .1.
        let s = FnSemantics::new(
            |a: &(u8, u8), b: &(u8, u8)| a.0 == b.0,
            |v: &(u8, u8)| ((v.0 as u64) << 32) | v.1 as u64,
        );
        let report = check(&s, &samples);

        let divergent_pair_exists = samples.iter().enumerate().any(|(i, a)| {
            samples[i + 1..].iter().any(|b| a.0 == b.0 && a.1 != b.1)
        });
        let flagged = report
            .violations()
            .iter()
            .any(|v| matches!(v, Violation::HashMismatch { .. }));
        prop_assert_eq!(flagged, divergent_pair_exists);

        for v in report.violations() {
            prop_assert!(
                matches!(v, Violation::HashMismatch { .. }),
                "unexpected violation kind: {:?}",
                v
            );
        }
    }
}

// Property: every reported index is in range, and equivalent-looking
// violations reference distinct samples.
proptest! {
    #[test]
    fn prop_reported_indices_in_range(
        samples in proptest::collection::vec(0i64..6, 0..12),
        modulus in 1u64..4
    ) {
        // Equivalence coarser than the hash: equality mod 3 paired with a
        // full-value hash, so hash-law violations appear whenever distinct
        // values share a residue class.
        let s = FnSemantics::new(
            |a: &i64, b: &i64| a.rem_euclid(3) == b.rem_euclid(3),
            move |v: &i64| (*v as u64).wrapping_mul(modulus),
        );
        let report = check(&s, &samples);
        let n = samples.len();
        for v in report.violations() {
            let ok = match *v {
                Violation::Reflexivity { index } | Violation::UnstableHash { index } => index < n,
                Violation::Symmetry { left, right }
                | Violation::UnstableEquality { left, right } => left < n && right < n && left != right,
                Violation::HashMismatch { left, right, .. } => left < n && right < n && left != right,
                Violation::Transitivity { first, second, third } => {
                    first < n && second < n && third < n
                        && first != second && second != third && first != third
                }
            };
            prop_assert!(ok, "out-of-range or degenerate violation: {:?}", v);
        }
    }
}
