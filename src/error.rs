use thiserror::Error;

/// Failures surfaced at the optimizer call boundary.
///
/// No partial work is observable on error: encoder output and search caches
/// are per-invocation and dropped on return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// The input network is malformed: a non-positive dimension, an index
    /// identity with conflicting dimensions, a label outside the dimension
    /// table, or an empty tensor list.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An intermediate dimension product exceeded the machine word. The cost
    /// kernels use checked arithmetic throughout, so wraparound is reported
    /// rather than silently producing a bogus cost.
    #[error("contraction cost overflowed the platform integer")]
    CostOverflow,

    /// A sanity check inside the search failed. This indicates a bug in the
    /// optimizer; callers should treat it as fatal.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
