//! Property-based tests for the multi-payload merge
//!
//! These tests verify invariants that should hold for all inputs:
//! - Merged violations equal the set intersection of the payloads'
//!   violations, regardless of payload order
//! - Merged measured lines equal the set union, regardless of payload order
//! - Merging a payload with itself changes nothing
//! - Re-querying never changes results

use diffmap::{CoberturaDriver, ReportAccessor, Violation};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Build a Cobertura payload for one file: `violations` are the zero-hit
/// subset of `measured`.
fn cobertura_xml(violations: &BTreeSet<usize>, measured: &BTreeSet<usize>) -> String {
    let mut xml = String::from(
        "<coverage><packages><package><classes><class filename=\"src/file.java\"><lines>",
    );
    for line in measured {
        let hits = if violations.contains(line) { 0 } else { 1 };
        xml.push_str(&format!("<line number=\"{line}\" hits=\"{hits}\"/>"));
    }
    xml.push_str("</lines></class></classes></package></packages></coverage>");
    xml
}

/// A payload's line sets: violations are forced to be a subset of measured,
/// matching how coverage tools report.
fn payload_sets() -> impl Strategy<Value = (BTreeSet<usize>, BTreeSet<usize>)> {
    // At least one measured line, so every payload mentions the file and the
    // expected-set arithmetic below matches the per-file merge.
    proptest::collection::btree_set(1usize..60, 1..12).prop_flat_map(|measured| {
        let lines: Vec<usize> = measured.iter().copied().collect();
        proptest::sample::subsequence(lines, 0..=measured.len())
            .prop_map(move |subset| (subset.into_iter().collect(), measured.clone()))
    })
}

fn accessor(payloads: Vec<String>) -> ReportAccessor {
    ReportAccessor::new(Box::new(CoberturaDriver::new()), payloads)
}

fn merged_violation_lines(accessor: &ReportAccessor) -> BTreeSet<usize> {
    accessor
        .violations("src/file.java")
        .unwrap()
        .into_iter()
        .map(|violation| violation.line)
        .collect()
}

fn merged_measured(accessor: &ReportAccessor) -> BTreeSet<usize> {
    accessor
        .measured_lines("src/file.java")
        .unwrap()
        .expect("coverage drivers always measure")
}

proptest! {
    /// Property: three payloads merge to intersection/union no matter the
    /// order they are supplied in.
    #[test]
    fn prop_merge_is_order_independent(
        a in payload_sets(),
        b in payload_sets(),
        c in payload_sets(),
    ) {
        let payloads = [
            cobertura_xml(&a.0, &a.1),
            cobertura_xml(&b.0, &b.1),
            cobertura_xml(&c.0, &c.1),
        ];

        let expected_violations: BTreeSet<usize> = a.0
            .intersection(&b.0)
            .copied()
            .collect::<BTreeSet<_>>()
            .intersection(&c.0)
            .copied()
            .collect();
        let expected_measured: BTreeSet<usize> =
            a.1.union(&b.1).chain(&c.1).copied().collect();

        let forward = accessor(payloads.to_vec());
        let mut reversed_payloads = payloads.to_vec();
        reversed_payloads.reverse();
        let reversed = accessor(reversed_payloads);
        let rotated = accessor(vec![
            payloads[1].clone(),
            payloads[2].clone(),
            payloads[0].clone(),
        ]);

        for merged in [&forward, &reversed, &rotated] {
            prop_assert_eq!(merged_violation_lines(merged), expected_violations.clone());
            prop_assert_eq!(merged_measured(merged), expected_measured.clone());
        }
    }

    /// Property: merging a payload with itself is the identity.
    #[test]
    fn prop_self_merge_is_identity(sets in payload_sets()) {
        let payload = cobertura_xml(&sets.0, &sets.1);
        let single = accessor(vec![payload.clone()]);
        let doubled = accessor(vec![payload.clone(), payload]);

        prop_assert_eq!(
            merged_violation_lines(&single),
            merged_violation_lines(&doubled)
        );
        prop_assert_eq!(merged_measured(&single), merged_measured(&doubled));
        prop_assert_eq!(merged_violation_lines(&single), sets.0);
        prop_assert_eq!(merged_measured(&single), sets.1);
    }

    /// Property: memoized re-queries are structurally equal to the first.
    #[test]
    fn prop_requery_is_stable(a in payload_sets(), b in payload_sets()) {
        let accessor = accessor(vec![
            cobertura_xml(&a.0, &a.1),
            cobertura_xml(&b.0, &b.1),
        ]);

        let first: BTreeSet<Violation> = accessor.violations("src/file.java").unwrap();
        let second: BTreeSet<Violation> = accessor.violations("src/file.java").unwrap();
        prop_assert_eq!(first, second);
    }
}
