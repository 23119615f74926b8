//! Fixed-capacity position history, newest first.

use glam::Vec3;

/// Ring buffer of the N most recent positions.
///
/// Logical index 0 is the newest sample and `len() - 1` the oldest. Pushing
/// moves the head back one slot and overwrites the oldest sample, which is
/// observably the same as shifting every entry toward the tail.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: Vec<Vec3>,
    head: usize,
}

impl HistoryBuffer {
    /// Create a buffer of `capacity` samples (at least one), all set to `fill`.
    pub fn new(capacity: usize, fill: Vec3) -> Self {
        Self {
            samples: vec![fill; capacity.max(1)],
            head: 0,
        }
    }

    /// Record a new position at the front.
    pub fn push(&mut self, position: Vec3) {
        let cap = self.samples.len();
        self.head = (self.head + cap - 1) % cap;
        self.samples[self.head] = position;
    }

    /// Sample `i` steps back in time (0 = newest). Indices past the end clamp to the oldest.
    pub fn get(&self, i: usize) -> Vec3 {
        let cap = self.samples.len();
        self.samples[(self.head + i.min(cap - 1)) % cap]
    }

    pub fn newest(&self) -> Vec3 {
        self.get(0)
    }

    pub fn oldest(&self) -> Vec3 {
        self.get(self.samples.len() - 1)
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.samples.len()).map(move |i| self.get(i))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: the buffer is pre-filled at construction.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
