//! The contraction-order search strategies and their shared dispatch surface.

pub mod breadth_first;
pub mod depth_first;
pub mod triple;

pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;

use crate::*;
use std::str::FromStr;

/// A strategy that turns an encoded network into an optimal contraction tree
/// and its total cost.
pub trait OrderOptimizer {
    fn optimize(&mut self, network: &EncodedNetwork) -> Result<(ContractionTree, SizeType)>;
}

#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum OptimizeKind {
    DepthFirst(DepthFirst),
    BreadthFirst(BreadthFirst),
}

impl OrderOptimizer for OptimizeKind {
    fn optimize(&mut self, network: &EncodedNetwork) -> Result<(ContractionTree, SizeType)> {
        match self {
            OptimizeKind::DepthFirst(optimizer) => optimizer.optimize(network),
            OptimizeKind::BreadthFirst(optimizer) => optimizer.optimize(network),
        }
    }
}

impl FromStr for OptimizeKind {
    type Err = OptimizeError;
    fn from_str(s: &str) -> Result<Self> {
        let kind = match s.to_lowercase().replace('_', "-").as_str() {
            "depth-first" | "dfs" => OptimizeKind::DepthFirst(Default::default()),
            "depth-first-cached" | "dfs-cached" => {
                OptimizeKind::DepthFirst(DepthFirst { caching: true })
            },
            "breadth-first" | "bfs" => OptimizeKind::BreadthFirst(Default::default()),
            _ => Err(OptimizeError::InvalidInput(format!("unknown optimization kind: {s}")))?,
        };
        Ok(kind)
    }
}

impl From<&str> for OptimizeKind {
    fn from(s: &str) -> Self {
        OptimizeKind::from_str(s).unwrap()
    }
}

fn dispatch(
    network: &EncodedNetwork,
    strategy: impl FnOnce(&EncodedNetwork) -> Result<(ContractionTree, SizeType)>,
) -> Result<(ContractionTree, SizeType)> {
    network.validate()?;
    match network.len() {
        1 => Ok((ContractionTree::Leaf(1), 0)),
        2 => Ok((ContractionTree::branch(1.into(), 2.into()), 0)),
        3 => triple::optimize_triple(&network.label_vecs(), &network.dims),
        _ => strategy(network),
    }
}

/// Depth-first branch-and-bound optimization of a pre-encoded network.
///
/// Networks of one or two tensors return the trivial tree at cost 0; for a
/// pair, the cost of its one contraction is deliberately not charged, since
/// no ordering decision exists to compare. Three tensors are resolved by the
/// closed-form [`triple::optimize_triple`] whatever the strategy; the search
/// itself runs from four tensors up. `enable_caching` memoizes the pairwise
/// cost kernel for the duration of the call and has no observable effect
/// beyond runtime.
pub fn depth_first_encoded(
    network: &EncodedNetwork,
    enable_caching: bool,
) -> Result<(ContractionTree, SizeType)> {
    dispatch(network, |network| {
        depth_first::optimize_depth_first(&network.label_vecs(), &network.dims, enable_caching)
    })
}

/// Breadth-first (subset dynamic programming) optimization of a pre-encoded
/// network. Small networks short-circuit exactly as in
/// [`depth_first_encoded`].
pub fn breadth_first_encoded(network: &EncodedNetwork) -> Result<(ContractionTree, SizeType)> {
    dispatch(network, |network| {
        breadth_first::optimize_breadth_first(&network.label_bitsets(), &network.dims)
    })
}

/// Depth-first optimization of raw `(index identity, dimension)` tensors.
///
/// # Example
///
/// ```rust
/// # use contraction_order::depth_first;
/// // A[a b] × B[b c] × C[c d] × D[d a], all bonds of extent 10
/// let tensors = [
///     vec![('a', 10), ('b', 10)],
///     vec![('b', 10), ('c', 10)],
///     vec![('c', 10), ('d', 10)],
///     vec![('d', 10), ('a', 10)],
/// ];
/// let (tree, cost) = depth_first(&tensors, false).unwrap();
/// assert_eq!(cost, 2100);
/// assert_eq!(tree.leaf_count(), 4);
/// ```
pub fn depth_first<L: Ord + Clone>(
    tensors: &[Vec<(L, i64)>],
    enable_caching: bool,
) -> Result<(ContractionTree, SizeType)> {
    depth_first_encoded(&encode::encode(tensors)?, enable_caching)
}

/// Breadth-first optimization of raw `(index identity, dimension)` tensors.
pub fn breadth_first<L: Ord + Clone>(tensors: &[Vec<(L, i64)>]) -> Result<(ContractionTree, SizeType)> {
    breadth_first_encoded(&encode::encode(tensors)?)
}

#[test]
fn playground() {
    let tensors = [vec![("i", 4), ("k", 5)], vec![("k", 5), ("j", 6)]];
    let (tree, cost) = depth_first(&tensors, false).unwrap();
    assert_eq!(tree.to_string(), "[1, 2]");
    assert_eq!(cost, 0);

    let mut kind: OptimizeKind = "bfs".into();
    let network = encode::encode(&tensors).unwrap();
    let (tree, cost) = kind.optimize(&network).unwrap();
    assert_eq!(tree.to_string(), "[1, 2]");
    assert_eq!(cost, 0);
}
