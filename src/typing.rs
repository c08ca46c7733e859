use crate::*;

/// Scalar used for dimensions, dimension products and contraction costs.
pub type SizeType = usize;

/// Dense integer label standing in for one tensor index (axis) identity.
pub type Label = usize;

/// A tensor, seen by the optimizer: its ordered, duplicate-free index labels.
pub type LabelVec = Vec<Label>;

/// A tensor as a bitset over the label universe.
pub type LabelSet = FixedBitSet;

/// Extent of each label, indexed by the label itself.
pub type DimTable = Vec<SizeType>;

/// A linear contraction order: `(a, b)` entries are absolute positions in the
/// growing tensor list (originals first, partial contractions appended).
pub type PairSeq = Vec<(usize, usize)>;

/// Bitmask over the input tensors of one network, used by the subset search.
pub type SubsetMask = usize;
