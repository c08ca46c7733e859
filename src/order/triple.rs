//! Closed-form optimizer for networks of exactly three tensors.

use crate::*;

// The three candidate trees, in tie-breaking order: the pair contracted
// first, then the tensor contracted last.
const CANDIDATES: [((usize, usize), usize); 3] = [((0, 1), 2), ((1, 2), 0), ((2, 0), 1)];

/// Picks the cheapest of the three pairings `[3,[1,2]]`, `[1,[2,3]]` and
/// `[2,[3,1]]` by comparing their total costs analytically, from the six
/// dimension products (exclusive to each tensor, shared between each pair).
/// Ties go to the earliest candidate in that order.
pub fn optimize_triple(inputs: &[LabelVec], dims: &DimTable) -> Result<(ContractionTree, SizeType)> {
    if inputs.len() != 3 {
        return Err(OptimizeError::InternalInvariant(format!(
            "three-tensor optimizer fed {} tensors",
            inputs.len()
        )));
    }

    // group[m] multiplies the extents of the labels owned by exactly the
    // tensors in membership mask m.
    let mut membership = vec![0u8; dims.len()];
    for (t, labels) in inputs.iter().enumerate() {
        for &label in labels {
            if label >= dims.len() {
                return Err(OptimizeError::InvalidInput(format!("label {label} has no dimension")));
            }
            membership[label] |= 1 << t;
        }
    }
    let mut group: [SizeType; 8] = [1; 8];
    for (label, &mask) in membership.iter().enumerate() {
        group[mask as usize] = group[mask as usize]
            .checked_mul(dims[label])
            .ok_or(OptimizeError::CostOverflow)?;
    }
    let exclusive = |t: usize| group[1 << t];
    let shared = |a: usize, b: usize| group[(1 << a) | (1 << b)];

    let mut best: Option<(ContractionTree, SizeType)> = None;
    for ((i, j), k) in CANDIDATES {
        // first contraction: Ti with Tj
        let inner = exclusive(i)
            .checked_mul(shared(i, k))
            .and_then(|c| c.checked_mul(exclusive(j)))
            .and_then(|c| c.checked_mul(shared(j, k)))
            .and_then(|c| c.checked_mul(shared(i, j)))
            .ok_or(OptimizeError::CostOverflow)?;
        // second contraction: the partial result with Tk
        let outer = exclusive(i)
            .checked_mul(exclusive(j))
            .and_then(|c| c.checked_mul(exclusive(k)))
            .and_then(|c| c.checked_mul(shared(i, k)))
            .and_then(|c| c.checked_mul(shared(j, k)))
            .ok_or(OptimizeError::CostOverflow)?;
        let total = inner.checked_add(outer).ok_or(OptimizeError::CostOverflow)?;

        if best.as_ref().is_none_or(|(_, cost)| total < *cost) {
            let tree = ContractionTree::branch(
                ContractionTree::Leaf(k + 1),
                ContractionTree::branch(ContractionTree::Leaf(i + 1), ContractionTree::Leaf(j + 1)),
            );
            best = Some((tree, total));
        }
    }

    best.ok_or_else(|| OptimizeError::InternalInvariant("no candidate pairing".into()))
}

#[test]
fn playground() {
    // chain T1=[a(2) b(10)], T2=[b(10) c(10)], T3=[c(10) d(2)]: contracting
    // the outer pair first would be a costly outer product
    let inputs = vec![vec![0, 1], vec![1, 2], vec![2, 3]];
    let dims = vec![2, 10, 10, 2];
    let (tree, cost) = optimize_triple(&inputs, &dims).unwrap();
    assert_eq!(cost, 240);
    assert_eq!(tree.to_string(), "[3, [1, 2]]");
    assert_eq!(cost, tree.cost(&inputs, &dims).unwrap());
}

#[test]
fn ties_prefer_the_first_candidate() {
    // fully symmetric triangle, all pairings cost the same
    let inputs = vec![vec![0, 1], vec![1, 2], vec![2, 0]];
    let dims = vec![3, 3, 3];
    let (tree, cost) = optimize_triple(&inputs, &dims).unwrap();
    assert_eq!(tree.to_string(), "[3, [1, 2]]");
    assert_eq!(cost, tree.cost(&inputs, &dims).unwrap());
    assert_eq!(cost, 27 + 9);
}
