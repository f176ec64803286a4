//! # Pipechain: staged scalar-stream pipeline
//!
//! A fixed-topology pipeline in which independent workers exchange f64
//! values strictly through point-to-point blocking message passing,
//! arranged in a linear chain. The head worker generates a bounded
//! stream, each interior worker applies its position-bound transform,
//! and the tail folds the stream into summary statistics.
//!
//! ## Architecture
//!
//! ```text
//! [Generator] ──► [Double] ──► [Sine] ──► [Square]* ──► [Accumulator]
//! ```
//!
//! - **Topology**: behavior is dispatched from a worker's rank through a
//!   single pure registry, queried once per worker and cached.
//! - **Transport**: rendezvous crossbeam channels: one value in flight
//!   per link, per-link FIFO, blocking send/receive.
//! - **Coordination**: one OS thread per worker, released together
//!   through a one-shot barrier so no send can outrun a receiver.
//! - **Determinism**: the generator consumes an injected, seeded value
//!   source; identical seeds reproduce identical runs.
//!
//! ## Example
//!
//! ```ignore
//! use pipechain::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let result = pipeline.run()?;
//! println!("{}", result);
//! ```

pub mod aggregate;
pub mod channel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod source;
pub mod topology;
pub mod worker;

// Re-export commonly used types
pub use aggregate::{AggregateResult, Aggregator};
pub use config::PipelineConfig;
pub use coordinator::Pipeline;
pub use error::{PipelineError, Result};
pub use source::{ScriptedSource, UniformSource, ValueSource};
pub use topology::{transform_for, StageFn, TransformKind};
pub use worker::{Worker, WorkerState};
