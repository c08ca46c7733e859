//! Normalizes heterogeneous index inputs into dense integer labels with a
//! parallel dimension table.

use crate::*;

/// The two normalized tensor representations used by the optimizers.
///
/// Label vectors keep the per-tensor index order and suit the depth-first
/// search, where pairwise symmetric differences dominate. Label bitsets suit
/// the breadth-first search, where subset operations dominate. Conversions
/// between the two preserve the label universe; a vector recovered from a
/// bitset lists labels in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorLabels {
    Vecs(Vec<LabelVec>),
    Bitsets(Vec<LabelSet>),
}

/// A tensor network after label encoding: one label collection per tensor
/// plus the extent of every label. All optimizer state derives from this.
#[derive(Debug, Clone)]
pub struct EncodedNetwork {
    pub tensors: TensorLabels,
    pub dims: DimTable,
}

impl EncodedNetwork {
    /// Number of tensors in the network.
    pub fn len(&self) -> usize {
        match &self.tensors {
            TensorLabels::Vecs(v) => v.len(),
            TensorLabels::Bitsets(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The network in label-vector form, converting from bitsets if needed.
    pub fn label_vecs(&self) -> Vec<LabelVec> {
        match &self.tensors {
            TensorLabels::Vecs(v) => v.clone(),
            TensorLabels::Bitsets(v) => v.iter().map(|s| s.ones().collect()).collect(),
        }
    }

    /// The network in label-bitset form, converting from vectors if needed.
    pub fn label_bitsets(&self) -> Vec<LabelSet> {
        match &self.tensors {
            TensorLabels::Vecs(v) => v
                .iter()
                .map(|labels| {
                    let mut set = LabelSet::with_capacity(self.dims.len());
                    labels.iter().for_each(|&l| set.insert(l));
                    set
                })
                .collect(),
            TensorLabels::Bitsets(v) => v.clone(),
        }
    }

    /// Checks that every label has an extent of at least one. Entry points
    /// call this once per invocation so the searches can assume a sane table.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(OptimizeError::InvalidInput("no tensors to contract".into()));
        }
        for (tensor, labels) in self.label_vecs().iter().enumerate() {
            for &label in labels {
                match self.dims.get(label).copied() {
                    None => {
                        return Err(OptimizeError::InvalidInput(format!(
                            "tensor {} refers to label {label}, but the dimension table has {} entries",
                            tensor + 1,
                            self.dims.len()
                        )));
                    },
                    Some(0) => {
                        return Err(OptimizeError::InvalidInput(format!(
                            "label {label} has extent 0 (tensor {})",
                            tensor + 1
                        )));
                    },
                    Some(_) => {},
                }
            }
        }
        Ok(())
    }
}

/// Encodes raw per-tensor index lists into an [`EncodedNetwork`] in
/// label-vector form.
///
/// Each input tensor is an ordered list of `(identity, extent)` pairs. Labels
/// are assigned densely from 0 in first-seen order, scanning tensors front to
/// back and each tensor left to right.
///
/// # Errors
///
/// [`OptimizeError::InvalidInput`] if any index reports a non-positive
/// extent, or if the same identity reports two different extents.
///
/// # Example
///
/// ```rust
/// # use contraction_order::encode::{encode, TensorLabels};
/// // T1=[i(4) k(5)], T2=[k(5) j(6)]
/// let network = encode(&[vec![('i', 4), ('k', 5)], vec![('k', 5), ('j', 6)]]).unwrap();
/// assert_eq!(network.tensors, TensorLabels::Vecs(vec![vec![0, 1], vec![1, 2]]));
/// assert_eq!(network.dims, vec![4, 5, 6]);
/// ```
pub fn encode<L: Ord + Clone>(tensors: &[Vec<(L, i64)>]) -> Result<EncodedNetwork> {
    let mut assigned: BTreeMap<L, Label> = BTreeMap::new();
    let mut dims: DimTable = Vec::new();
    let mut encoded: Vec<LabelVec> = Vec::with_capacity(tensors.len());

    for (t, tensor) in tensors.iter().enumerate() {
        let mut labels = LabelVec::with_capacity(tensor.len());
        for (axis, (identity, extent)) in tensor.iter().enumerate() {
            if *extent <= 0 {
                return Err(OptimizeError::InvalidInput(format!(
                    "tensor {}, axis {}: non-positive dimension {extent}",
                    t + 1,
                    axis + 1
                )));
            }
            let extent = *extent as SizeType;
            let label = match assigned.get(identity) {
                Some(&label) => {
                    if dims[label] != extent {
                        return Err(OptimizeError::InvalidInput(format!(
                            "tensor {}, axis {}: dimension {extent} conflicts with earlier {}",
                            t + 1,
                            axis + 1,
                            dims[label]
                        )));
                    }
                    label
                },
                None => {
                    let label = dims.len();
                    assigned.insert(identity.clone(), label);
                    dims.push(extent);
                    label
                },
            };
            labels.push(label);
        }
        encoded.push(labels);
    }

    Ok(EncodedNetwork { tensors: TensorLabels::Vecs(encoded), dims })
}

#[test]
fn playground() {
    // labels come out in first-seen order, not identity order
    let network = encode(&[vec![("z", 2), ("a", 3)], vec![("a", 3), ("m", 4)]]).unwrap();
    assert_eq!(network.label_vecs(), vec![vec![0, 1], vec![1, 2]]);
    assert_eq!(network.dims, vec![2, 3, 4]);

    let sets = network.label_bitsets();
    assert_eq!(sets[0].ones().collect_vec(), vec![0, 1]);
    assert_eq!(sets[1].ones().collect_vec(), vec![1, 2]);
}
