//! Per-worker runtime
//!
//! Each worker owns one endpoint of the chain and runs a single
//! sequential loop. Its behavior is fixed at construction: the stage
//! registry is queried once and the result cached for the worker's
//! lifetime. The loop itself is a small state machine; a worker is
//! `Idle` until the startup barrier releases, `Running` for exactly
//! `num_elements` iterations, and `Done` afterwards. A worker that fails
//! mid-stream never reaches `Done`.

use crate::aggregate::{AggregateResult, Aggregator};
use crate::channel::{self, Endpoint, RecvPort, SendPort};
use crate::error::{PipelineError, Result};
use crate::source::ValueSource;
use crate::topology::{self, TransformKind};
use std::sync::Barrier;

/// Lifecycle state of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Created, waiting for the startup barrier
    Idle,
    /// Inside the processing loop
    Running,
    /// Loop completed all iterations; no further sends or receives
    Done,
}

/// A single participant in the chain
pub struct Worker {
    rank: usize,
    total: usize,
    num_elements: u64,
    /// Cached registry lookup; never varies mid-run.
    transform: TransformKind,
    endpoint: Endpoint,
    source: Option<Box<dyn ValueSource>>,
    state: WorkerState,
}

impl Worker {
    /// Create a worker for its endpoint of a `total`-rank chain
    ///
    /// The head worker (rank 0) must be given a value source; every other
    /// rank must not. Topology and wiring are validated here; a
    /// misconfigured worker refuses to enter its loop.
    pub fn new(
        total: usize,
        num_elements: u64,
        endpoint: Endpoint,
        source: Option<Box<dyn ValueSource>>,
    ) -> Result<Self> {
        let rank = endpoint.rank;
        topology::validate_topology(rank, total)?;
        channel::validate_endpoint(&endpoint, total)?;

        let transform = topology::transform_for(rank, total);
        let is_head = matches!(transform, TransformKind::Generate);
        if is_head && source.is_none() {
            return Err(PipelineError::Topology(
                "head worker requires a value source".to_string(),
            ));
        }
        if !is_head && source.is_some() {
            return Err(PipelineError::Topology(format!(
                "rank {} does not consume a value source",
                rank
            )));
        }

        Ok(Self {
            rank,
            total,
            num_elements,
            transform,
            endpoint,
            source,
            state: WorkerState::Idle,
        })
    }

    /// This worker's rank in the chain
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Current lifecycle state
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// The cached position-bound behavior of this worker
    pub fn transform(&self) -> TransformKind {
        self.transform
    }

    /// Wait for the group barrier, then run the role-specific loop
    ///
    /// Returns the finalized aggregate from the terminal role; every
    /// other role returns `None`. In a single-worker chain the lone
    /// worker generates and discards, and reports the empty aggregate.
    pub fn run(&mut self, barrier: &Barrier) -> Result<Option<AggregateResult>> {
        barrier.wait();
        self.state = WorkerState::Running;
        tracing::debug!("Worker {} running as {:?}", self.rank, self.transform);

        let outcome = match self.transform {
            TransformKind::Generate => self.run_generator(),
            TransformKind::Transform(stage) => {
                let inbound = self.inbound()?;
                let outbound = self.outbound()?;
                for _ in 0..self.num_elements {
                    let value = inbound.recv()?;
                    outbound.send(stage.apply(value))?;
                }
                tracing::debug!("Worker {}: processing complete", self.rank);
                Ok(None)
            }
            TransformKind::Accumulate { pre } => {
                let inbound = self.inbound()?;
                let mut aggregator = Aggregator::new();
                for _ in 0..self.num_elements {
                    let mut value = inbound.recv()?;
                    if let Some(stage) = pre {
                        value = stage.apply(value);
                    }
                    aggregator.accumulate(value);
                }
                tracing::debug!(
                    "Worker {}: accumulated {} values",
                    self.rank,
                    aggregator.count()
                );
                Ok(Some(aggregator.finalize()))
            }
        }?;

        self.state = WorkerState::Done;
        Ok(outcome)
    }

    fn run_generator(&mut self) -> Result<Option<AggregateResult>> {
        let source = self.source.as_mut().ok_or_else(|| {
            PipelineError::Topology("head worker lost its value source".to_string())
        })?;

        for _ in 0..self.num_elements {
            let value = source.next_value();
            // A single-worker chain has no outbound link; the value is
            // drawn and discarded so generator state advances identically.
            if let Some(outbound) = &self.endpoint.outbound {
                outbound.send(value)?;
            }
        }
        tracing::debug!("Worker {}: generation complete", self.rank);

        Ok((self.total == 1).then(|| Aggregator::new().finalize()))
    }

    fn inbound(&self) -> Result<&RecvPort> {
        self.endpoint.inbound.as_ref().ok_or_else(|| {
            PipelineError::Topology(format!("rank {} is missing its inbound link", self.rank))
        })
    }

    fn outbound(&self) -> Result<&SendPort> {
        self.endpoint.outbound.as_ref().ok_or_else(|| {
            PipelineError::Topology(format!("rank {} is missing its outbound link", self.rank))
        })
    }
}
