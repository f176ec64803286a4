//! Error handling for the pipeline
//!
//! This module defines the crate error type and a Result alias used
//! throughout the library. All variants are fatal: a failed worker fails
//! the whole run and no partial aggregate is ever reported.

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Errors related to configuration loading/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to chain topology (bad rank, bad worker count)
    #[error("Topology error: {0}")]
    Topology(String),

    /// Errors related to channel communication on a specific link
    #[error("Transport error on link {from} -> {to}: {message}")]
    Transport {
        from: usize,
        to: usize,
        message: String,
    },

    /// A worker thread panicked before reporting a result
    #[error("Worker {rank} panicked")]
    WorkerPanicked { rank: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create a transport error for the link between two ranks
    pub fn transport(from: usize, to: usize, message: impl Into<String>) -> Self {
        PipelineError::Transport {
            from,
            to,
            message: message.into(),
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
