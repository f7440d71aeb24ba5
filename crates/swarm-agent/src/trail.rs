//! Bounded position-history ring buffer.
//!
//! Each agent keeps a short trail of recently sampled positions for the
//! renderer.  The buffer has a fixed capacity decided at population build
//! time; pushing past capacity overwrites the oldest sample, so memory and
//! draw cost stay bounded no matter how long the simulation runs.

use swarm_core::Vec2;

/// A fixed-capacity ring buffer of recent positions, oldest first.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trail {
    buf: Vec<Vec2>,
    capacity: usize,
    /// Index of the oldest sample when the buffer is full.
    head: usize,
}

impl Trail {
    /// Create an empty trail holding at most `capacity` samples.
    /// A zero capacity is bumped to 1 so `push` is always well-defined.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Number of samples currently held (≤ capacity).
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest if the buffer is full.
    pub fn push(&mut self, p: Vec2) {
        if self.buf.len() < self.capacity {
            self.buf.push(p);
        } else {
            self.buf[self.head] = p;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<Vec2> {
        if self.buf.is_empty() {
            None
        } else if self.buf.len() < self.capacity {
            self.buf.last().copied()
        } else {
            let newest = (self.head + self.capacity - 1) % self.capacity;
            Some(self.buf[newest])
        }
    }

    /// Iterate samples oldest → newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        // When full, buf[head..] holds the oldest run and buf[..head] the
        // wrapped newest run.  When not yet full, head is 0 and the chain
        // degenerates to plain insertion order.
        let (wrapped, oldest) = self.buf.split_at(self.head);
        oldest.iter().chain(wrapped.iter()).copied()
    }

    /// Drop all samples, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.head = 0;
    }
}
