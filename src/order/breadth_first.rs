//! Breadth-first constructive search: dynamic programming over all subsets
//! of the input tensors, building optimal subtrees bottom-up.

use crate::*;
use std::cmp::Ordering;

/// Optimal way of reducing one tensor subset to a single tensor: its total
/// cost, the resulting uncontracted index set, and the subtree realizing it.
#[derive(Debug, Clone)]
struct DpEntry {
    cost: SizeType,
    inds: LabelSet,
    tree: ContractionTree,
}

/// Orders subset masks by their elements in ascending order, shorter prefix
/// first. Used to visit each unordered pair of equal-cardinality subsets
/// exactly once.
fn lex_cmp(mut a: SubsetMask, mut b: SubsetMask) -> Ordering {
    while a != 0 && b != 0 {
        match a.trailing_zeros().cmp(&b.trailing_zeros()) {
            Ordering::Equal => {
                a &= a - 1;
                b &= b - 1;
            },
            unequal => return unequal,
        }
    }
    a.count_ones().cmp(&b.count_ones())
}

/// Finds the optimal contraction tree by combining, for every subset size
/// `c`, all disjoint pairs of already-solved subsets of sizes `d` and
/// `c - d`. Strictly cheaper candidates replace earlier ones, so on ties the
/// earliest visited pairing is kept and the output is reproducible.
///
/// Optimal, like the depth-first search, but with `O(2^N)` memory in
/// exchange for never revisiting a subset. The subset masks are machine
/// words, which bounds the network width long after the running time has
/// become the real limit.
pub fn optimize_breadth_first(
    inputs: &[LabelSet],
    dims: &DimTable,
) -> Result<(ContractionTree, SizeType)> {
    let n = inputs.len();
    if n >= SubsetMask::BITS as usize {
        return Err(OptimizeError::InvalidInput(format!(
            "{n} tensors exceed the {}-bit subset width",
            SubsetMask::BITS
        )));
    }

    // layers[c] maps every c-element subset to its optimal reduction;
    // layers[1] is seeded from the inputs at zero cost.
    let mut layers: Vec<BTreeMap<SubsetMask, DpEntry>> = vec![BTreeMap::new(); n + 1];
    for (j, set) in inputs.iter().enumerate() {
        let entry = DpEntry { cost: 0, inds: set.clone(), tree: ContractionTree::Leaf(j + 1) };
        layers[1].insert(1 << j, entry);
    }

    for c in 2..=n {
        let mut layer: BTreeMap<SubsetMask, DpEntry> = BTreeMap::new();
        for d in 1..=c / 2 {
            for (&a, ta) in &layers[d] {
                for (&b, tb) in &layers[c - d] {
                    // an input tensor may appear on one side only
                    if a & b != 0 {
                        continue;
                    }
                    if d == c - d && lex_cmp(b, a) == Ordering::Less {
                        continue;
                    }
                    let (inds, pair_cost) = helpers::contract_pair_set(&ta.inds, &tb.inds, dims)?;
                    let cost = pair_cost
                        .checked_add(ta.cost)
                        .and_then(|cost| cost.checked_add(tb.cost))
                        .ok_or(OptimizeError::CostOverflow)?;
                    let s = a | b;
                    if layer.get(&s).is_none_or(|entry| cost < entry.cost) {
                        let tree = ContractionTree::branch(ta.tree.clone(), tb.tree.clone());
                        layer.insert(s, DpEntry { cost, inds, tree });
                    }
                }
            }
        }
        layers[c] = layer;
    }

    match layers.pop().and_then(|layer| layer.into_values().next()) {
        Some(entry) => Ok((entry.tree, entry.cost)),
        None => Err(OptimizeError::InternalInvariant(
            "subset search left the full network unsolved".into(),
        )),
    }
}

/// Breadth-first strategy handle for [`OrderOptimizer`](crate::order::OrderOptimizer)
/// dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl order::OrderOptimizer for BreadthFirst {
    fn optimize(&mut self, network: &EncodedNetwork) -> Result<(ContractionTree, SizeType)> {
        order::breadth_first_encoded(network)
    }
}
