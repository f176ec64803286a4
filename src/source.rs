//! Value sources feeding the head of the chain
//!
//! The generator worker does not own the randomness itself; it consumes a
//! [`ValueSource`] injected at construction. This keeps the generator
//! state explicit and seedable instead of hiding it in process globals,
//! and lets tests drive the chain with a scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A deterministic stream of input values for the generator worker
pub trait ValueSource: Send {
    /// Produce the next value of the stream
    fn next_value(&mut self) -> f64;
}

/// Seeded uniform source over `[min, max)`
///
/// Two sources constructed with the same seed and range produce the same
/// sequence, so runs are reproducible.
pub struct UniformSource {
    rng: StdRng,
    min: f64,
    max: f64,
}

impl UniformSource {
    /// Create a source producing values uniformly in `[min, max)`
    pub fn new(seed: u64, min: f64, max: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            min,
            max,
        }
    }
}

impl ValueSource for UniformSource {
    fn next_value(&mut self) -> f64 {
        self.rng.random_range(self.min..self.max)
    }
}

/// Replays a fixed sequence of values
///
/// Used in tests to drive the chain with known inputs. Panics if asked
/// for more values than it was given; tests size the sequence to the
/// element count.
pub struct ScriptedSource {
    values: std::vec::IntoIter<f64>,
}

impl ScriptedSource {
    /// Create a source replaying `values` in order
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl ValueSource for ScriptedSource {
    fn next_value(&mut self) -> f64 {
        self.values
            .next()
            .expect("scripted source exhausted before the stream ended")
    }
}
