//! Pipeline coordinator: group formation, barrier release, teardown
//!
//! The coordinator owns a run end to end: it validates the configuration
//! before any thread exists, wires the chain, spawns one named thread per
//! rank, and releases them together through a one-shot barrier so no
//! worker can send before every worker is ready to receive. After the
//! stream drains it joins every thread and surfaces the terminal worker's
//! aggregate. Any worker failure fails the whole run; partial sums are
//! discarded, never reported as complete.

use crate::aggregate::AggregateResult;
use crate::channel::chain;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::source::{UniformSource, ValueSource};
use crate::worker::Worker;
use std::sync::{Arc, Barrier};

/// A configured pipeline, ready to run
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline with the configured seeded uniform source
    pub fn run(&self) -> Result<AggregateResult> {
        let source = UniformSource::new(
            self.config.seed,
            self.config.value_min,
            self.config.value_max,
        );
        self.run_with_source(Box::new(source))
    }

    /// Run the pipeline feeding the head worker from `source`
    ///
    /// The source seam mirrors the generator injection used in tests: a
    /// scripted source drives the chain with known inputs.
    pub fn run_with_source(&self, source: Box<dyn ValueSource>) -> Result<AggregateResult> {
        self.config.validate()?;
        let total = self.config.workers;
        let num_elements = self.config.num_elements;

        tracing::info!(
            "Starting chain of {} workers over {} elements",
            total,
            num_elements
        );
        if total < 4 {
            tracing::warn!(
                "Chains with fewer than 4 workers leave part of the stage roster unused"
            );
        }

        // Construct every worker before spawning anything: a bad topology
        // aborts group formation with no threads to clean up.
        let mut source = Some(source);
        let workers = chain(total)
            .into_iter()
            .map(|endpoint| {
                let src = if endpoint.rank == 0 { source.take() } else { None };
                Worker::new(total, num_elements, endpoint, src)
            })
            .collect::<Result<Vec<Worker>>>()?;

        let barrier = Arc::new(Barrier::new(total));
        let mut handles = Vec::with_capacity(total);
        for mut worker in workers {
            let rank = worker.rank();
            let barrier = barrier.clone();
            let handle = std::thread::Builder::new()
                .name(format!("pipeline-worker-{rank}"))
                .spawn(move || worker.run(&barrier))?;
            handles.push((rank, handle));
        }

        // Orderly teardown: join every worker, then decide the outcome.
        let mut result = None;
        let mut failure = None;
        for (rank, handle) in handles {
            match handle.join() {
                Ok(Ok(Some(aggregate))) => result = Some(aggregate),
                Ok(Ok(None)) => {}
                Ok(Err(e)) => {
                    tracing::error!("Worker {} failed: {}", rank, e);
                    failure.get_or_insert(e);
                }
                Err(_) => {
                    tracing::error!("Worker {} panicked", rank);
                    failure.get_or_insert(PipelineError::WorkerPanicked { rank });
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        let result = result.ok_or_else(|| {
            PipelineError::Topology("no terminal worker reported a result".to_string())
        })?;
        tracing::info!(
            "Chain complete: {} values, sum {:.6}, mean {:.6}",
            result.count,
            result.sum,
            result.mean
        );
        Ok(result)
    }
}
