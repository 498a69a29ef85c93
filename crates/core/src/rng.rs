//! RNG module - seeded randomness and the upcoming-pipe queue
//!
//! Pipes are drawn independently from the weighted catalog table (no bag).
//! The queue always holds exactly [`QUEUE_SIZE`] kinds: consuming the front
//! shifts everything forward and appends one fresh draw at the tail.
//!
//! Also provides a simple LCG so that a seed fully determines a run.

use crate::pipes::weighted_random_kind;
use crate::types::{PipeKind, QUEUE_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Fixed-length queue of upcoming pipes
#[derive(Debug, Clone)]
pub struct PipeQueue {
    pipes: [PipeKind; QUEUE_SIZE],
    rng: SimpleRng,
}

impl PipeQueue {
    /// Create a queue filled with fresh draws from `seed`
    pub fn new(seed: u32) -> Self {
        Self::from_rng(SimpleRng::new(seed))
    }

    /// Create a queue that continues an existing random sequence
    pub fn from_rng(mut rng: SimpleRng) -> Self {
        let mut pipes = [PipeKind::Horizontal; QUEUE_SIZE];
        for slot in pipes.iter_mut() {
            *slot = weighted_random_kind(&mut rng);
        }
        Self { pipes, rng }
    }

    /// Throw the current contents away and draw a new full queue
    pub fn refill(&mut self) {
        for i in 0..QUEUE_SIZE {
            self.pipes[i] = weighted_random_kind(&mut self.rng);
        }
    }

    /// Next pipe to place
    pub fn peek(&self) -> Option<PipeKind> {
        self.pipes.first().copied()
    }

    /// Remove the front pipe and append a fresh one at the tail
    pub fn pop(&mut self) -> PipeKind {
        let front = self.pipes[0];
        self.pipes.copy_within(1.., 0);
        self.pipes[QUEUE_SIZE - 1] = weighted_random_kind(&mut self.rng);
        front
    }

    /// Copy of the whole queue, front first
    pub fn pipes(&self) -> [PipeKind; QUEUE_SIZE] {
        self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Get the current RNG state (for restarting game with same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Overwrite the queue contents (for testing)
    #[cfg(test)]
    pub fn set_pipes(&mut self, pipes: [PipeKind; QUEUE_SIZE]) {
        self.pipes = pipes;
    }
}

impl Default for PipeQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
