//! Shared kernels: checked dimension products, label symmetric difference and
//! the pairwise contraction cost, for both tensor representations.

use crate::*;
use num::integer::Roots;

/// Computes the product of the extents of `labels` against the dimension
/// table. The empty product is 1.
///
/// All multiplications are checked; wraparound surfaces as
/// [`OptimizeError::CostOverflow`] instead of a silently wrong product.
///
/// # Example
///
/// ```rust
/// # use contraction_order::helpers::dims_product;
/// let dims = vec![2, 3, 5];
/// assert_eq!(dims_product([0, 2].into_iter(), &dims).unwrap(), 10);
/// assert_eq!(dims_product([].into_iter(), &dims).unwrap(), 1);
/// ```
pub fn dims_product(labels: impl Iterator<Item = Label>, dims: &DimTable) -> Result<SizeType> {
    let mut product: SizeType = 1;
    for label in labels {
        let extent = *dims
            .get(label)
            .ok_or_else(|| OptimizeError::InvalidInput(format!("label {label} has no dimension")))?;
        product = product.checked_mul(extent).ok_or(OptimizeError::CostOverflow)?;
    }
    Ok(product)
}

/// Removes the common labels of two operands and concatenates what is left:
/// the labels of `a` not in `b`, in `a`'s order, followed by the labels of
/// `b` not in `a`, in `b`'s order.
///
/// Each label is assumed to occur at most once per operand; a duplicated
/// label within one operand makes the result meaningless.
///
/// # Example
///
/// ```rust
/// # use contraction_order::helpers::symmetric_difference;
/// assert_eq!(symmetric_difference(&[0, 1, 3], &[1, 2]), vec![0, 3, 2]);
/// ```
pub fn symmetric_difference(a: &[Label], b: &[Label]) -> LabelVec {
    let mut result: LabelVec = a.iter().filter(|x| !b.contains(x)).copied().collect();
    result.extend(b.iter().filter(|x| !a.contains(x)));
    result
}

fn pair_cost(da: SizeType, db: SizeType, dr: SizeType) -> Result<SizeType> {
    let product = da
        .checked_mul(db)
        .and_then(|p| p.checked_mul(dr))
        .ok_or(OptimizeError::CostOverflow)?;
    Ok(product.sqrt())
}

/// Contracts two tensors in label-vector form.
///
/// # Parameters
///
/// - `a`, `b`: The operands' index labels.
/// - `dims`: Extent of each label.
///
/// # Returns
///
/// The uncontracted result labels (the operands' symmetric difference, see
/// [`symmetric_difference`] for the ordering) and the arithmetic cost of the
/// pairwise contraction, `⌊√(D(a)·D(b)·D(r))⌋` where `D` is the product of
/// extents. The cost equals the product of the two external dimension groups
/// with the shared one, i.e. the number of scalar multiplications performed.
///
/// # Example
///
/// ```rust
/// # use contraction_order::helpers::contract_pair;
/// // matrix product: [i k] × [k j] -> [i j]
/// let dims = vec![4, 5, 6];
/// let (result, cost) = contract_pair(&[0, 1], &[1, 2], &dims).unwrap();
/// assert_eq!(result, vec![0, 2]);
/// assert_eq!(cost, 4 * 5 * 6);
/// ```
pub fn contract_pair(a: &[Label], b: &[Label], dims: &DimTable) -> Result<(LabelVec, SizeType)> {
    let result = symmetric_difference(a, b);
    let da = dims_product(a.iter().copied(), dims)?;
    let db = dims_product(b.iter().copied(), dims)?;
    let dr = dims_product(result.iter().copied(), dims)?;
    let cost = pair_cost(da, db, dr)?;
    Ok((result, cost))
}

/// Contracts two tensors in label-bitset form. Same contract as
/// [`contract_pair`]; the result set is `a ^ b`.
pub fn contract_pair_set(a: &LabelSet, b: &LabelSet, dims: &DimTable) -> Result<(LabelSet, SizeType)> {
    let result = a ^ b;
    let da = dims_product(a.ones(), dims)?;
    let db = dims_product(b.ones(), dims)?;
    let dr = dims_product(result.ones(), dims)?;
    let cost = pair_cost(da, db, dr)?;
    Ok((result, cost))
}

#[test]
fn playground() {
    // T1=[a(2) b(10)], T2=[b(10) c(10)]: external 2·10, shared 10
    let dims = vec![2, 10, 10];
    let (result, cost) = contract_pair(&[0, 1], &[1, 2], &dims).unwrap();
    assert_eq!(result, vec![0, 2]);
    assert_eq!(cost, 200);

    // outer product: disjoint operands, nothing contracted
    let (result, cost) = contract_pair(&[0], &[2], &dims).unwrap();
    assert_eq!(result, vec![0, 2]);
    assert_eq!(cost, 20);
}

#[test]
fn overflow_is_reported() {
    let dims = vec![usize::MAX, usize::MAX];
    assert_eq!(dims_product([0, 1].into_iter(), &dims), Err(OptimizeError::CostOverflow));
}
