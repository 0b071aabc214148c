//! # History
//!
//! The two pieces of sampler state: the angular cursor that assigns an
//! inferred angle to each reading, and the bounded list of collected samples.

use serde::Serialize;

use crate::{ANGULAR_STEPS, DEFAULT_CAPACITY, Sample};

/// Synthetic angle index, wrapping modulo `ANGULAR_STEPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationCursor {
    position: usize,
    rotations: usize,
}

impl RotationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current angle index in `[0, ANGULAR_STEPS)`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of times the cursor wrapped from 359 back to 0.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Reset to 0 if the position cannot be read from a message of `len` readings.
    ///
    /// # Returns
    /// `true` if the cursor was reset.
    pub fn realign(&mut self, len: usize) -> bool {
        if self.position >= len {
            self.position = 0;
            true
        } else {
            false
        }
    }

    /// Step one angular position forward.
    pub fn advance(&mut self) {
        self.position = (self.position + 1) % ANGULAR_STEPS;
        if self.position == 0 {
            self.rotations += 1;
        }
    }
}

/// Ordered, append-only samples bounded at a fixed capacity.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SampleHistory {
    samples: Vec<Sample>,
    capacity: usize,
}

impl SampleHistory {
    /// Bound the history at `capacity` samples.
    ///
    /// At most `DEFAULT_CAPACITY` slots are reserved up front; larger
    /// histories grow as samples arrive.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Complete rotations' worth of samples recorded so far.
    pub fn rotations(&self) -> usize {
        self.samples.len() / ANGULAR_STEPS
    }

    /// Append a sample. Returns `false` and leaves the history untouched when full.
    pub fn push(&mut self, sample: Sample) -> bool {
        if self.is_full() {
            return false;
        }
        self.samples.push(sample);
        true
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }
}

impl AsRef<[Sample]> for SampleHistory {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a SampleHistory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
