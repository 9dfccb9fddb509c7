//! Equality/hash contract checker.
//!
//! [`check`] evaluates a strategy against caller-supplied samples and
//! collects every violation of the equality contract it can find, instead of
//! stopping at the first. Inputs are never mutated; the checker is a pure
//! function over the sample slice.
//!
//! The laws checked, over the sampled values:
//! - reflexivity: `equivalent(a, a)` for every sample;
//! - symmetry: `equivalent(a, b) == equivalent(b, a)` for every pair;
//! - hash law: `equivalent(a, b)` implies `hash_one(a) == hash_one(b)`;
//! - transitivity: `equivalent(a, b)` and `equivalent(b, c)` imply
//!   `equivalent(a, c)`;
//! - consistency: `equivalent` and `hash_one` answer the same on repeated
//!   calls while the values are unchanged.

use crate::semantics::Semantics;
use core::fmt;

/// A single detected inconsistency, identified by sample indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `equivalent(a, a)` returned false.
    Reflexivity { index: usize },
    /// `equivalent(a, b)` and `equivalent(b, a)` disagreed.
    Symmetry { left: usize, right: usize },
    /// Equivalent samples hashed differently.
    HashMismatch {
        left: usize,
        right: usize,
        left_hash: u64,
        right_hash: u64,
    },
    /// `equivalent(a, b)` and `equivalent(b, c)` held but `equivalent(a, c)`
    /// did not.
    Transitivity {
        first: usize,
        second: usize,
        third: usize,
    },
    /// `hash_one` returned different values for the same unchanged sample.
    UnstableHash { index: usize },
    /// `equivalent` answered differently for the same unchanged pair.
    UnstableEquality { left: usize, right: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Reflexivity { index } => {
                write!(f, "sample #{index} is not equivalent to itself")
            }
            Violation::Symmetry { left, right } => {
                write!(f, "equivalence of samples #{left} and #{right} is asymmetric")
            }
            Violation::HashMismatch {
                left,
                right,
                left_hash,
                right_hash,
            } => write!(
                f,
                "samples #{left} and #{right} are equivalent but hash to \
                 {left_hash:#x} vs {right_hash:#x}"
            ),
            Violation::Transitivity {
                first,
                second,
                third,
            } => write!(
                f,
                "samples #{first}~#{second} and #{second}~#{third} hold but \
                 #{first}~#{third} does not"
            ),
            Violation::UnstableHash { index } => {
                write!(f, "hash of unchanged sample #{index} varied between calls")
            }
            Violation::UnstableEquality { left, right } => write!(
                f,
                "equivalence of unchanged samples #{left} and #{right} varied \
                 between calls"
            ),
        }
    }
}

/// Outcome of a contract check: the full violation list, never just the
/// first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractReport {
    samples: usize,
    violations: Vec<Violation>,
}

impl ContractReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of samples the check ran over.
    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl fmt::Display for ContractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return write!(f, "contract holds over {} samples", self.samples);
        }
        writeln!(
            f,
            "{} violation(s) over {} samples:",
            self.violations.len(),
            self.samples
        )?;
        for v in &self.violations {
            writeln!(f, "  - {v}")?;
        }
        Ok(())
    }
}

/// Check `semantics` against `samples`, collecting all violations found.
pub fn check<T, E>(semantics: &E, samples: &[T]) -> ContractReport
where
    E: Semantics<T>,
{
    let n = samples.len();
    let mut violations = Vec::new();

    // Cache both relations so the transitivity pass reuses the answers the
    // pairwise pass observed, and so instability is detected against the
    // cached first answer.
    let mut hashes = Vec::with_capacity(n);
    for (i, a) in samples.iter().enumerate() {
        let h = semantics.hash_one(a);
        if semantics.hash_one(a) != h {
            violations.push(Violation::UnstableHash { index: i });
        }
        hashes.push(h);

        if !semantics.equivalent(a, a) {
            violations.push(Violation::Reflexivity { index: i });
        }
    }

    let mut eq = vec![false; n * n];
    for i in 0..n {
        eq[i * n + i] = true;
        for j in (i + 1)..n {
            let ij = semantics.equivalent(&samples[i], &samples[j]);
            if semantics.equivalent(&samples[i], &samples[j]) != ij {
                violations.push(Violation::UnstableEquality { left: i, right: j });
            }
            let ji = semantics.equivalent(&samples[j], &samples[i]);
            if ij != ji {
                violations.push(Violation::Symmetry { left: i, right: j });
            }
            // Record the forward answer; asymmetry is already reported.
            eq[i * n + j] = ij;
            eq[j * n + i] = ij;

            if ij && hashes[i] != hashes[j] {
                violations.push(Violation::HashMismatch {
                    left: i,
                    right: j,
                    left_hash: hashes[i],
                    right_hash: hashes[j],
                });
            }
        }
    }

    // Only triples whose first two legs hold can violate transitivity.
    for i in 0..n {
        for j in 0..n {
            if i == j || !eq[i * n + j] {
                continue;
            }
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                if eq[j * n + k] && !eq[i * n + k] {
                    violations.push(Violation::Transitivity {
                        first: i,
                        second: j,
                        third: k,
                    });
                }
            }
        }
    }

    ContractReport {
        samples: n,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{FnSemantics, ValueSemantics};

    /// Invariant: a coherent value strategy produces an empty report.
    #[test]
    fn coherent_strategy_passes() {
        let samples = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let report = check(&ValueSemantics::new(), &samples);
        assert!(report.is_ok(), "unexpected violations: {report}");
        assert_eq!(report.samples(), 3);
    }

    /// Invariant: equivalent samples hashing differently are reported as a
    /// hash mismatch carrying both hashes.
    #[test]
    fn hash_mismatch_detected() {
        // Equality by content, hash by instance position in the slice: equal
        // samples at different indices hash apart.
        let samples = vec![1, 2, 1];
        let base = samples.as_ptr() as usize;
        let s = FnSemantics::new(
            |a: &i32, b: &i32| a == b,
            move |v: &i32| (v as *const i32 as usize - base) as u64,
        );
        let report = check(&s, &samples);
        assert!(!report.is_ok());
        assert!(report.violations().iter().any(|v| matches!(
            v,
            Violation::HashMismatch { left: 0, right: 2, .. }
        )));
    }

    /// Invariant: all violations are collected, not just the first.
    #[test]
    fn collects_every_violation() {
        // Never reflexive, constant hash: one reflexivity violation per
        // sample and nothing else.
        let s = FnSemantics::new(|_: &i32, _: &i32| false, |_: &i32| 0);
        let report = check(&s, &[10, 20, 30]);
        assert_eq!(report.violations().len(), 3);
        for (i, v) in report.violations().iter().enumerate() {
            assert_eq!(v, &Violation::Reflexivity { index: i });
        }
    }

    /// Invariant: asymmetric equivalence is reported for the offending pair.
    #[test]
    fn asymmetry_detected() {
        // "Less-or-equal" is not symmetric.
        let s = FnSemantics::new(|a: &i32, b: &i32| a <= b, |_: &i32| 0);
        let report = check(&s, &[1, 2]);
        assert!(report
            .violations()
            .iter()
            .any(|v| matches!(v, Violation::Symmetry { left: 0, right: 1 })));
    }

    /// Invariant: a broken transitive chain is reported with all three
    /// indices.
    #[test]
    fn transitivity_detected() {
        // "Within distance 1" relates 0~1 and 1~2 but not 0~2.
        let s = FnSemantics::new(|a: &i32, b: &i32| (a - b).abs() <= 1, |_: &i32| 0);
        let report = check(&s, &[0, 1, 2]);
        assert!(report.violations().iter().any(|v| matches!(
            v,
            Violation::Transitivity {
                first: 0,
                second: 1,
                third: 2
            }
        )));
    }

    /// Invariant: a hash that varies across calls on an unchanged sample is
    /// reported as unstable.
    #[test]
    fn unstable_hash_detected() {
        use std::cell::Cell;
        let calls = Cell::new(0u64);
        let s = FnSemantics::new(
            |a: &i32, b: &i32| a == b,
            move |_: &i32| {
                calls.set(calls.get() + 1);
                calls.get()
            },
        );
        let report = check(&s, &[7]);
        assert!(report
            .violations()
            .iter()
            .any(|v| matches!(v, Violation::UnstableHash { index: 0 })));
    }

    /// Invariant: the empty sample slice trivially satisfies the contract.
    #[test]
    fn empty_samples_pass() {
        let report = check(&ValueSemantics::new(), &Vec::<String>::new());
        assert!(report.is_ok());
        assert_eq!(report.samples(), 0);
    }

    /// Invariant: the report renders every violation in its display form.
    #[test]
    fn report_display_lists_violations() {
        let s = FnSemantics::new(|_: &i32, _: &i32| false, |_: &i32| 0);
        let report = check(&s, &[1]);
        let rendered = report.to_string();
        assert!(rendered.contains("1 violation(s) over 1 samples"));
        assert!(rendered.contains("not equivalent to itself"));
    }
}
