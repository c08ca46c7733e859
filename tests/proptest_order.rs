//! Property tests for the optimizer invariants.

use contraction_order::helpers::symmetric_difference;
use contraction_order::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Networks of 2..=6 tensors where every index is a fresh bond between one
/// pair of tensors, plus optional free (uncontracted) axes. Extents stay
/// small so even exhaustive enumeration is cheap and nothing overflows.
fn arb_network() -> impl Strategy<Value = Vec<Vec<(String, i64)>>> {
    (2usize..=6).prop_flat_map(|n| {
        let pairs: Vec<(usize, usize)> =
            (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))).collect();
        let bonds = proptest::collection::vec(proptest::option::of(1i64..=4), pairs.len());
        let frees = proptest::collection::vec(proptest::option::of(1i64..=4), n);
        (Just(pairs), bonds, frees).prop_map(move |(pairs, bonds, frees)| {
            let mut tensors: Vec<Vec<(String, i64)>> = vec![Vec::new(); n];
            for (&(i, j), bond) in pairs.iter().zip(bonds) {
                if let Some(extent) = bond {
                    tensors[i].push((format!("b{i}.{j}"), extent));
                    tensors[j].push((format!("b{i}.{j}"), extent));
                }
            }
            for (i, free) in frees.into_iter().enumerate() {
                if let Some(extent) = free {
                    tensors[i].push((format!("x{i}"), extent));
                }
            }
            tensors
        })
    })
}

proptest! {
    /// Every input tensor appears in the tree exactly once, whatever the
    /// strategy.
    #[test]
    fn leaves_cover_every_tensor_once(tensors in arb_network()) {
        let n = tensors.len();
        for (tree, _) in [
            depth_first(&tensors, false).unwrap(),
            depth_first(&tensors, true).unwrap(),
            breadth_first(&tensors).unwrap(),
        ] {
            let mut leaves = tree.leaves();
            leaves.sort_unstable();
            prop_assert_eq!(leaves, (1..=n).collect::<Vec<_>>());
        }
    }

    /// The reported cost re-derives from the returned tree alone. A lone
    /// pair is exempt: its single contraction is returned uncharged.
    #[test]
    fn cost_equals_tree_evaluation(tensors in arb_network()) {
        prop_assume!(tensors.len() >= 3);
        let network = encode(&tensors).unwrap();
        let inputs = network.label_vecs();
        for (tree, cost) in [
            depth_first(&tensors, false).unwrap(),
            breadth_first(&tensors).unwrap(),
        ] {
            prop_assert_eq!(cost, tree.cost(&inputs, &network.dims).unwrap());
        }
    }

    /// Both search strategies find the same optimum, and the kernel cache is
    /// invisible in the result.
    #[test]
    fn strategies_and_caching_agree(tensors in arb_network()) {
        let (_, plain) = depth_first(&tensors, false).unwrap();
        let (_, cached) = depth_first(&tensors, true).unwrap();
        let (_, subsets) = breadth_first(&tensors).unwrap();
        prop_assert_eq!(plain, cached);
        prop_assert_eq!(plain, subsets);
    }

    /// Reordering the input tensors cannot change the optimal cost.
    #[test]
    fn rotation_preserves_cost(tensors in arb_network(), shift in 0usize..6) {
        let n = tensors.len();
        let rotated: Vec<_> = (0..n).map(|i| tensors[(i + shift) % n].clone()).collect();
        let (_, cost) = breadth_first(&tensors).unwrap();
        let (_, rotated_cost) = breadth_first(&rotated).unwrap();
        prop_assert_eq!(cost, rotated_cost);
        let (_, dfs_cost) = depth_first(&rotated, false).unwrap();
        prop_assert_eq!(cost, dfs_cost);
    }

    /// The pairwise result index set obeys `(A ∪ B) \ (A ∩ B)`.
    #[test]
    fn symmetric_difference_law(
        a in proptest::collection::btree_set(0usize..12, 0..8),
        b in proptest::collection::btree_set(0usize..12, 0..8),
    ) {
        let a_vec: Vec<usize> = a.iter().copied().collect();
        let b_vec: Vec<usize> = b.iter().copied().collect();
        let result: BTreeSet<usize> =
            symmetric_difference(&a_vec, &b_vec).into_iter().collect();
        let expected: BTreeSet<usize> = a.union(&b).copied().collect::<BTreeSet<_>>()
            .difference(&a.intersection(&b).copied().collect())
            .copied()
            .collect();
        prop_assert_eq!(result, expected);
    }
}
