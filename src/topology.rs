//! Chain topology and the stage function registry
//!
//! Every worker determines its behavior purely from its position in the
//! chain. The mapping lives in [`transform_for`], a single pure function
//! queried once per worker at startup, instead of rank conditionals
//! scattered through the processing loops.
//!
//! For a chain of `total` workers:
//!
//! ```text
//! rank 0        → generator (emits raw values)
//! rank 1        → double:  x ↦ 2x
//! rank 2        → sine:    x ↦ sin(x)
//! rank 3..n-2   → square:  x ↦ x²
//! rank n-1      → accumulator (folds the stream into sum/count/mean)
//! ```
//!
//! A two-worker chain is special: rank 1 is both the first transform
//! stage and the terminal worker, so it doubles each value immediately
//! before accumulating it.

use crate::error::{PipelineError, Result};

/// A per-stage scalar transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageFn {
    /// `x ↦ 2x`
    Double,
    /// `x ↦ sin(x)`
    Sine,
    /// `x ↦ x²`
    Square,
}

impl StageFn {
    /// Apply the transform to a single value
    pub fn apply(self, x: f64) -> f64 {
        match self {
            StageFn::Double => x * 2.0,
            StageFn::Sine => x.sin(),
            StageFn::Square => x * x,
        }
    }
}

/// The position-bound behavior of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// Head of the chain: emit raw generated values
    Generate,
    /// Interior worker: receive, transform, forward
    Transform(StageFn),
    /// Tail of the chain: receive and accumulate. In a two-worker chain
    /// the tail is also the first transform stage, so `pre` carries the
    /// transform applied before each value is folded in.
    Accumulate { pre: Option<StageFn> },
}

/// Validate a `(rank, total)` pair before a worker enters its loop
pub fn validate_topology(rank: usize, total: usize) -> Result<()> {
    if total == 0 {
        return Err(PipelineError::Topology(
            "worker group must contain at least one rank".to_string(),
        ));
    }
    if rank >= total {
        return Err(PipelineError::Topology(format!(
            "rank {} out of range for {} workers",
            rank, total
        )));
    }
    Ok(())
}

/// Neighbor ranks of `rank` in a linear chain: `(inbound, outbound)`
///
/// The head has no inbound neighbor, the tail no outbound one. A
/// single-worker chain has neither.
pub fn neighbors(rank: usize, total: usize) -> (Option<usize>, Option<usize>) {
    let inbound = (rank > 0).then(|| rank - 1);
    let outbound = (rank + 1 < total).then(|| rank + 1);
    (inbound, outbound)
}

/// The stage function registry: map a worker's position to its behavior
///
/// Pure in `(rank, total)`: repeated queries always return the same
/// kind. Callers cache the result for the worker's lifetime.
pub fn transform_for(rank: usize, total: usize) -> TransformKind {
    if rank == 0 {
        TransformKind::Generate
    } else if rank == total - 1 {
        TransformKind::Accumulate {
            pre: (rank == 1).then_some(StageFn::Double),
        }
    } else {
        TransformKind::Transform(stage_fn(rank))
    }
}

/// The transform assigned to an interior stage at `rank`
fn stage_fn(rank: usize) -> StageFn {
    match rank {
        1 => StageFn::Double,
        2 => StageFn::Sine,
        _ => StageFn::Square,
    }
}
