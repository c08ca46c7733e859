use contraction_order::*;
use rand::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    /// Open chain: T1=[x0 x1], T2=[x1 x2], ..., all bonds of extent `bond`.
    fn chain(n: usize, bond: i64) -> Vec<Vec<(usize, i64)>> {
        (0..n).map(|i| vec![(i, bond), (i + 1, bond)]).collect()
    }

    /// Closed ring of `n` tensors, all bonds of extent `bond`.
    fn ring(n: usize, bond: i64) -> Vec<Vec<(usize, i64)>> {
        (0..n).map(|i| vec![(i, bond), ((i + 1) % n, bond)]).collect()
    }

    fn all_strategies(tensors: &[Vec<(usize, i64)>]) -> Vec<(ContractionTree, SizeType)> {
        vec![
            depth_first(tensors, false).unwrap(),
            depth_first(tensors, true).unwrap(),
            breadth_first(tensors).unwrap(),
        ]
    }

    #[test]
    fn single_tensor_is_a_bare_leaf() {
        let (tree, cost) = depth_first(&[vec![('i', 2), ('j', 3)]], false).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree, ContractionTree::Leaf(1));
        assert_eq!(cost, 0);
        let (tree, cost) = breadth_first(&[vec![('i', 2), ('j', 3)]]).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree, ContractionTree::Leaf(1));
        assert_eq!(cost, 0);
    }

    #[test]
    fn two_tensors_are_trivial_and_uncharged() {
        // the one possible contraction is not costed: there is no ordering
        // decision to make below three tensors
        let tensors = [vec![('i', 4), ('k', 5)], vec![('k', 5), ('j', 6)]];
        for (tree, cost) in
            [depth_first(&tensors, false).unwrap(), breadth_first(&tensors).unwrap()]
        {
            assert!(!tree.is_leaf());
            assert_eq!(tree.to_string(), "[1, 2]");
            assert_eq!(cost, 0);
        }
    }

    #[test]
    fn three_tensor_chain_avoids_the_outer_product() {
        let tensors =
            [vec![('a', 2), ('b', 10)], vec![('b', 10), ('c', 10)], vec![('c', 10), ('d', 2)]];
        for (tree, cost) in
            [depth_first(&tensors, false).unwrap(), breadth_first(&tensors).unwrap()]
        {
            assert_eq!(cost, 240);
            let rendered = tree.to_string();
            assert!(
                rendered == "[3, [1, 2]]" || rendered == "[1, [2, 3]]",
                "unexpected pairing {rendered}"
            );
        }
    }

    #[test]
    fn ring_of_four_agrees_across_strategies() {
        let tensors = ring(4, 10);
        for (tree, cost) in all_strategies(&tensors) {
            assert_eq!(cost, 2100);
            let mut leaves = tree.leaves();
            leaves.sort_unstable();
            assert_eq!(leaves, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn giant_dimensions_overflow_loudly() {
        // four tensors, every pair sharing a bond of extent 10^6: the triple
        // dimension product wraps the machine word long before any result
        let bonds = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let mut tensors: Vec<Vec<(usize, i64)>> = vec![Vec::new(); 4];
        for (b, &(i, j)) in bonds.iter().enumerate() {
            tensors[i].push((b, 1_000_000));
            tensors[j].push((b, 1_000_000));
        }
        assert_eq!(depth_first(&tensors, false), Err(OptimizeError::CostOverflow));
        assert_eq!(depth_first(&tensors, true), Err(OptimizeError::CostOverflow));
        assert_eq!(breadth_first(&tensors), Err(OptimizeError::CostOverflow));
    }

    #[test]
    fn caching_never_changes_the_answer() {
        // a chain re-creates the same partial index patterns over and over,
        // so the cache is exercised heavily here
        let tensors = chain(8, 3);
        let (plain_tree, plain_cost) = depth_first(&tensors, false).unwrap();
        let (cached_tree, cached_cost) = depth_first(&tensors, true).unwrap();
        assert_eq!(plain_cost, cached_cost);
        assert_eq!(plain_tree, cached_tree);
    }

    #[test]
    fn equal_dimension_networks_agree_for_all_sizes() {
        for n in 3..=8 {
            let tensors = ring(n, 2);
            let costs: Vec<SizeType> =
                all_strategies(&tensors).into_iter().map(|(_, cost)| cost).collect();
            assert!(costs.windows(2).all(|w| w[0] == w[1]), "n={n}: costs {costs:?}");
        }
    }

    #[test]
    fn random_networks_agree_and_evaluate_to_their_cost() {
        let mut rng = StdRng::seed_from_u64(7);
        for trial in 0..40 {
            let n = rng.random_range(3..=7);
            let mut tensors: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
            let mut bond = 0;
            for i in 0..n {
                for j in (i + 1)..n {
                    if rng.random_bool(0.6) {
                        let extent = rng.random_range(2..=5);
                        tensors[i].push((bond, extent));
                        tensors[j].push((bond, extent));
                        bond += 1;
                    }
                }
            }

            let network = encode(&tensors).unwrap();
            let inputs = network.label_vecs();
            let results = all_strategies(&tensors);
            let reference = results[0].1;
            for (tree, cost) in results {
                assert_eq!(cost, reference, "trial {trial}: strategies disagree");
                assert_eq!(cost, tree.cost(&inputs, &network.dims).unwrap(), "trial {trial}");
                let mut leaves = tree.leaves();
                leaves.sort_unstable();
                assert_eq!(leaves, (1..=n).collect::<Vec<_>>(), "trial {trial}");
            }
        }
    }

    #[test]
    fn permuting_tensors_permutes_the_tree() {
        // strictly increasing extents make the optimum unique, so the tree
        // must follow the relabeling exactly
        let tensors =
            [vec![('a', 2), ('b', 3)], vec![('b', 3), ('c', 4)], vec![('c', 4), ('d', 5)]];
        let (tree, cost) = depth_first(&tensors, false).unwrap();
        assert_eq!(tree.to_string(), "[3, [1, 2]]");
        assert_eq!(cost, 64);

        // old tensor i becomes new tensor position (i + 2) mod 3 + 1
        let rotated = [tensors[1].clone(), tensors[2].clone(), tensors[0].clone()];
        let (tree, cost) = depth_first(&rotated, false).unwrap();
        assert_eq!(tree.to_string(), "[2, [3, 1]]");
        assert_eq!(cost, 64);
    }

    #[test]
    fn bitset_form_feeds_either_strategy() {
        let network = encode(&ring(5, 3)).unwrap();
        let as_bitsets =
            EncodedNetwork { tensors: TensorLabels::Bitsets(network.label_bitsets()), dims: network.dims.clone() };
        let (_, from_vecs) = depth_first_encoded(&network, false).unwrap();
        let (_, from_sets) = depth_first_encoded(&as_bitsets, false).unwrap();
        assert_eq!(from_vecs, from_sets);
        let (_, bfs_cost) = breadth_first_encoded(&as_bitsets).unwrap();
        assert_eq!(from_vecs, bfs_cost);
    }

    #[test]
    fn empty_networks_are_rejected() {
        let no_tensors: [Vec<(char, i64)>; 0] = [];
        assert!(matches!(
            depth_first(&no_tensors, false),
            Err(OptimizeError::InvalidInput(_))
        ));
        assert!(matches!(breadth_first(&no_tensors), Err(OptimizeError::InvalidInput(_))));
    }
}
