//! Property-based tests for pool flattening and descriptor parsing.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;

use devicefarm_cli::domain::{PoolDefinitions, PoolError, flatten, parse_descriptor};

fn descriptor() -> impl Strategy<Value = String> {
    ("[A-Z0-9]{1,8}", "[A-Za-z][A-Za-z0-9 ]{0,15}")
        .prop_map(|(id, name)| format!("(arn=device:{id}) {name}"))
}

/// Up to five pools named p0..p4. Pool `i` may reference only pools with a
/// higher index, so the graph is acyclic.
fn acyclic_defs() -> impl Strategy<Value = PoolDefinitions> {
    prop::collection::vec(
        (
            prop::collection::vec(descriptor(), 1..5),
            prop::collection::vec(0usize..5, 0..3),
        ),
        1..5,
    )
    .prop_map(|pools| {
        let count = pools.len();
        pools
            .into_iter()
            .enumerate()
            .map(|(i, (mut items, refs))| {
                items.extend(
                    refs.into_iter()
                        .filter(|r| *r > i && *r < count)
                        .map(|r| format!("+p{r}")),
                );
                (format!("p{i}"), items)
            })
            .collect()
    })
}

proptest! {
    /// Flattened pools are sorted, duplicate-free, and hold no references.
    #[test]
    fn prop_flatten_output_sorted_dedup_reference_free(defs in acyclic_defs()) {
        let flat = flatten(&defs).expect("acyclic definitions flatten");
        for items in flat.values() {
            let mut expected = items.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(items, &expected);
            prop_assert!(items.iter().all(|i| !i.starts_with('+')));
        }
    }

    /// A pool's flattened items are the union of its own literals and the
    /// flattened items of every pool it references.
    #[test]
    fn prop_flatten_is_union_of_references(defs in acyclic_defs()) {
        let flat = flatten(&defs).expect("acyclic definitions flatten");
        for (name, raw) in &defs {
            let mut expected = BTreeSet::new();
            for item in raw {
                match item.strip_prefix('+') {
                    Some(target) => expected.extend(flat[target].iter().cloned()),
                    None => {
                        expected.insert(item.clone());
                    }
                }
            }
            let got: BTreeSet<String> = flat[name].iter().cloned().collect();
            prop_assert_eq!(got, expected);
        }
    }

    /// Flattening already-flat definitions changes nothing.
    #[test]
    fn prop_flatten_is_idempotent(defs in acyclic_defs()) {
        let once = flatten(&defs).expect("flatten");
        let twice = flatten(&once).expect("flatten again");
        prop_assert_eq!(once, twice);
    }

    /// Closing any chain back to its start is always reported as circular.
    #[test]
    fn prop_cycles_always_detected(len in 1usize..6) {
        let defs: PoolDefinitions = (0..len)
            .map(|i| {
                (
                    format!("p{i}"),
                    vec!["(arn=device:X) X".to_string(), format!("+p{}", (i + 1) % len)],
                )
            })
            .collect();
        let err = flatten(&defs).expect_err("cycle must be rejected");
        prop_assert!(matches!(err, PoolError::Circular { .. }), "got {err:?}");
    }

    /// Every generated descriptor parses to its device resource.
    #[test]
    fn prop_descriptor_parses_resource(id in "[A-Z0-9]{1,12}", name in "[A-Za-z][A-Za-z0-9 ]{0,20}") {
        let arn = parse_descriptor(&format!("(arn=device:{id}) {name}")).expect("valid");
        prop_assert_eq!(arn.resource, format!("device:{id}"));
    }
}
