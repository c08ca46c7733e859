//! Optimal pairwise contraction orders for tensor networks.
//!
//! Given N tensors, each described by its index labels with known extents,
//! this crate searches for the full binary contraction tree of minimum total
//! arithmetic cost. Two exact strategies are provided: a depth-first
//! branch-and-bound enumeration ([`order::depth_first`]) and a breadth-first
//! dynamic program over tensor subsets ([`order::breadth_first`]). Networks
//! of one, two or three tensors are resolved without search.
//!
//! The crate is purely structural: it never touches tensor values, only
//! index sets and dimension products. Performing the contraction itself is
//! the caller's business.

pub mod encode;
pub mod error;
pub mod helpers;
pub mod order;
pub mod tree;
pub mod typing;

pub(crate) use fixedbitset::FixedBitSet;
pub(crate) use itertools::Itertools;
pub(crate) use std::collections::BTreeMap;

pub use crate::encode::{EncodedNetwork, TensorLabels, encode};
pub use crate::error::{OptimizeError, Result};
pub use crate::order::{
    BreadthFirst, DepthFirst, OptimizeKind, OrderOptimizer, breadth_first, breadth_first_encoded,
    depth_first, depth_first_encoded,
};
pub use crate::tree::ContractionTree;
pub use crate::typing::*;
