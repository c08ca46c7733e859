//! Binary contraction trees and the pair-sequence assembler.

use crate::*;

/// A pairwise contraction order as a full binary tree. Leaves are 1-based
/// input tensor numbers; a branch contracts its two children.
///
/// Trees own their nodes outright: nothing is shared with optimizer caches,
/// so callers are free to reshape or discard them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractionTree {
    Leaf(usize),
    Branch(Box<ContractionTree>, Box<ContractionTree>),
}

impl From<usize> for ContractionTree {
    fn from(leaf: usize) -> Self {
        ContractionTree::Leaf(leaf)
    }
}

impl ContractionTree {
    /// Builds the branch `[left, right]`.
    pub fn branch(left: ContractionTree, right: ContractionTree) -> Self {
        ContractionTree::Branch(Box::new(left), Box::new(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ContractionTree::Leaf(_))
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            ContractionTree::Leaf(_) => 1,
            ContractionTree::Branch(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Flattens the tree's leaves, left to right.
    pub fn leaves(&self) -> Vec<usize> {
        fn walk(tree: &ContractionTree, out: &mut Vec<usize>) {
            match tree {
                ContractionTree::Leaf(i) => out.push(*i),
                ContractionTree::Branch(left, right) => {
                    walk(left, out);
                    walk(right, out);
                },
            }
        }
        let mut out = Vec::with_capacity(self.leaf_count());
        walk(self, &mut out);
        out
    }

    /// Evaluates the tree against a network independently of any optimizer:
    /// the sum of the per-pair contraction costs along the tree.
    ///
    /// `inputs` holds the label vector of each input tensor, `inputs[i - 1]`
    /// for leaf `i`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use contraction_order::ContractionTree;
    /// let tree = ContractionTree::branch(3.into(), ContractionTree::branch(1.into(), 2.into()));
    /// let inputs = vec![vec![0, 1], vec![1, 2], vec![2, 3]];
    /// let dims = vec![2, 10, 10, 2];
    /// assert_eq!(tree.cost(&inputs, &dims).unwrap(), 240);
    /// ```
    pub fn cost(&self, inputs: &[LabelVec], dims: &DimTable) -> Result<SizeType> {
        self.evaluate(inputs, dims).map(|(_, cost)| cost)
    }

    fn evaluate(&self, inputs: &[LabelVec], dims: &DimTable) -> Result<(LabelVec, SizeType)> {
        match self {
            ContractionTree::Leaf(i) => match i.checked_sub(1).and_then(|i| inputs.get(i)) {
                Some(labels) => Ok((labels.clone(), 0)),
                None => Err(OptimizeError::InvalidInput(format!(
                    "leaf {i} is out of range for {} tensors",
                    inputs.len()
                ))),
            },
            ContractionTree::Branch(left, right) => {
                let (left_labels, left_cost) = left.evaluate(inputs, dims)?;
                let (right_labels, right_cost) = right.evaluate(inputs, dims)?;
                let (labels, pair) = helpers::contract_pair(&left_labels, &right_labels, dims)?;
                let cost = left_cost
                    .checked_add(right_cost)
                    .and_then(|c| c.checked_add(pair))
                    .ok_or(OptimizeError::CostOverflow)?;
                Ok((labels, cost))
            },
        }
    }
}

impl std::fmt::Display for ContractionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractionTree::Leaf(i) => write!(f, "{i}"),
            ContractionTree::Branch(left, right) => write!(f, "[{left}, {right}]"),
        }
    }
}

/// Assembles a linear pair sequence into a nested binary tree.
///
/// Starting from the leaf nodes `1..=n`, each `(a, b)` appends the branch
/// `[nodes[a], nodes[b]]` to the node list; the last appended branch is the
/// full tree. Positions index the growing list, so the same position is never
/// consumed twice by a well-formed sequence.
///
/// # Example
///
/// ```rust
/// # use contraction_order::tree::sequence_to_tree;
/// let tree = sequence_to_tree(3, &vec![(0, 2), (3, 1)]).unwrap();
/// assert_eq!(tree.to_string(), "[[1, 3], 2]");
/// ```
pub fn sequence_to_tree(n: usize, pairs: &PairSeq) -> Result<ContractionTree> {
    let mut nodes: Vec<ContractionTree> = (1..=n).map(ContractionTree::Leaf).collect();
    for &(a, b) in pairs {
        if a >= nodes.len() || b >= nodes.len() {
            return Err(OptimizeError::InvalidInput(format!(
                "pair ({a}, {b}) is out of range for {} nodes",
                nodes.len()
            )));
        }
        let node = ContractionTree::branch(nodes[a].clone(), nodes[b].clone());
        nodes.push(node);
    }
    nodes.pop().ok_or_else(|| OptimizeError::InvalidInput("no tensors to contract".into()))
}

#[test]
fn playground() {
    let tree = sequence_to_tree(4, &vec![(0, 1), (2, 3), (4, 5)]).unwrap();
    assert_eq!(tree.to_string(), "[[1, 2], [3, 4]]");
    assert_eq!(tree.leaves(), vec![1, 2, 3, 4]);
    assert_eq!(tree.leaf_count(), 4);
}
