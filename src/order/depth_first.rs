//! Depth-first constructive search with branch-and-bound pruning.

use crate::*;

/// Memoized pairwise contractions, keyed by the operand label vectors exactly
/// as encountered. Symmetric pairs are cached separately; the savings come
/// from the many repeated partials the enumeration revisits, not from key
/// canonicalization.
type PairCache = BTreeMap<(LabelVec, LabelVec), (LabelVec, SizeType)>;

struct SearchBest {
    cost: SizeType,
    seq: PairSeq,
}

fn contract_cached(
    cache: &mut Option<PairCache>,
    a: &LabelVec,
    b: &LabelVec,
    dims: &DimTable,
) -> Result<(LabelVec, SizeType)> {
    match cache {
        Some(cache) => {
            let key = (a.clone(), b.clone());
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
            let value = helpers::contract_pair(a, b, dims)?;
            cache.insert(key, value.clone());
            Ok(value)
        },
        None => helpers::contract_pair(a, b, dims),
    }
}

/// One recursion frame: extend the current partial order by every admissible
/// pair of remaining positions. `tensors` grows by one partial contraction
/// per extension and the pair sequence records positions into that growing
/// list, so a recorded pair stays valid for the assembler no matter what is
/// contracted afterwards.
fn search(
    seq: &mut PairSeq,
    tensors: &mut Vec<LabelVec>,
    remaining: &[usize],
    running: SizeType,
    dims: &DimTable,
    best: &mut SearchBest,
    cache: &mut Option<PairCache>,
) -> Result<()> {
    // Only reached when every extension along the way improved on the best
    // known complete order.
    if remaining.len() == 1 {
        if running > best.cost {
            return Err(OptimizeError::InternalInvariant(
                "pruning admitted a complete order worse than the best known".into(),
            ));
        }
        best.cost = running;
        best.seq = seq.clone();
        return Ok(());
    }

    for i in 0..remaining.len() {
        for j in (i + 1)..remaining.len() {
            let (a, b) = (remaining[i], remaining[j]);
            let (result, pair_cost) = contract_cached(cache, &tensors[a], &tensors[b], dims)?;
            let extended = running.checked_add(pair_cost).ok_or(OptimizeError::CostOverflow)?;
            if extended >= best.cost {
                continue;
            }

            seq.push((a, b));
            tensors.push(result);
            let mut next_remaining =
                remaining.iter().copied().filter(|&p| p != a && p != b).collect_vec();
            next_remaining.push(tensors.len() - 1);

            search(seq, tensors, &next_remaining, extended, dims, best, cache)?;

            tensors.pop();
            seq.pop();
        }
    }
    Ok(())
}

/// Enumerates every contraction order of the input tensors depth-first,
/// pruning any partial order whose accumulated cost already meets the best
/// complete order found. Globally optimal; practical for networks of up to
/// roughly a dozen tensors, depending on how sharply the costs separate.
///
/// With `enable_caching` the pairwise kernel is memoized per invocation;
/// the result is unchanged, only repeated kernel work is skipped.
pub fn optimize_depth_first(
    inputs: &[LabelVec],
    dims: &DimTable,
    enable_caching: bool,
) -> Result<(ContractionTree, SizeType)> {
    let n = inputs.len();
    let mut best = SearchBest { cost: SizeType::MAX, seq: PairSeq::new() };
    let mut cache = enable_caching.then(PairCache::new);
    let mut tensors = inputs.to_vec();
    let mut seq = PairSeq::new();

    search(&mut seq, &mut tensors, &(0..n).collect_vec(), 0, dims, &mut best, &mut cache)?;

    if best.seq.len() + 1 != n {
        return Err(OptimizeError::InternalInvariant(
            "search finished without a complete contraction order".into(),
        ));
    }
    let tree = tree::sequence_to_tree(n, &best.seq)?;
    Ok((tree, best.cost))
}

/// Depth-first strategy handle for [`OrderOptimizer`](crate::order::OrderOptimizer)
/// dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst {
    pub caching: bool,
}

impl order::OrderOptimizer for DepthFirst {
    fn optimize(&mut self, network: &EncodedNetwork) -> Result<(ContractionTree, SizeType)> {
        order::depth_first_encoded(network, self.caching)
    }
}

#[test]
fn playground() {
    // ring of four tensors with dimension-10 bonds: the optimal order
    // contracts neighbors, never the diagonal outer product
    let inputs = vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]];
    let dims = vec![10, 10, 10, 10];
    let (tree, cost) = optimize_depth_first(&inputs, &dims, false).unwrap();
    assert_eq!(cost, tree.cost(&inputs, &dims).unwrap());
    let mut leaves = tree.leaves();
    leaves.sort_unstable();
    assert_eq!(leaves, vec![1, 2, 3, 4]);

    let (_, cached_cost) = optimize_depth_first(&inputs, &dims, true).unwrap();
    assert_eq!(cost, cached_cost);
}
