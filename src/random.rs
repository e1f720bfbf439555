#![warn(clippy::all, clippy::pedantic)]

/// Source of piece choices. Implementations return an index in `[0, len)`.
pub trait PieceRandom {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Uniform choices from `fastrand`.
#[derive(Debug, Clone)]
pub struct FastRandom {
    rng: fastrand::Rng,
}

impl FastRandom {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceRandom for FastRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.usize(0..len)
    }
}

/// Replays a fixed list of indices, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }

    /// Always picks the same index.
    #[must_use]
    pub fn constant(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl PieceRandom for SequenceRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 || self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor = (self.cursor + 1) % self.indices.len();
        index % len
    }
}
