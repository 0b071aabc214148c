//! # Laser Core
//!
//! This crate provides the core data structures for sampling a rotating range sensor.
//! It defines the `RangeScan` trait, which is the only view of a scan message the
//! sampler needs, and a concrete `ScanMessage` struct.
//! The `Sampler` turns a stream of scan messages into a bounded `SampleHistory`
//! of one reading per message.

use serde::{Deserialize, Serialize};

mod history;
mod sampler;

pub use history::{RotationCursor, SampleHistory};
pub use sampler::{Sampler, SamplerState};

/// Number of angular positions in one rotation (one reading per integer degree).
pub const ANGULAR_STEPS: usize = 360;

/// Number of full rotations collected before the sampler stops.
pub const DEFAULT_ROTATIONS: usize = 3;

/// Default history capacity: `ANGULAR_STEPS * DEFAULT_ROTATIONS`.
pub const DEFAULT_CAPACITY: usize = ANGULAR_STEPS * DEFAULT_ROTATIONS;

pub trait RangeScan {
    fn ranges(&self) -> &[f32];
}

/// One delivery from the sensor stream.
///
/// Only `ranges` is read. Other fields of a full laser scan message
/// (`angle_min`, `range_max`, ...) are ignored when decoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ScanMessage {
    pub ranges: Vec<f32>,
}

impl ScanMessage {
    pub fn new(ranges: Vec<f32>) -> Self {
        Self { ranges }
    }

    /// A message with `len` readings all equal to `value`.
    pub fn uniform(len: usize, value: f32) -> Self {
        Self {
            ranges: vec![value; len],
        }
    }
}

impl RangeScan for ScanMessage {
    fn ranges(&self) -> &[f32] {
        &self.ranges
    }
}

impl RangeScan for [f32] {
    fn ranges(&self) -> &[f32] {
        self
    }
}

impl RangeScan for Vec<f32> {
    fn ranges(&self) -> &[f32] {
        self
    }
}

/// A single reading with the angle inferred from call order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Angle in whole degrees, `[0, ANGULAR_STEPS)`.
    pub angle_index: usize,
    /// Distance as reported by the sensor; not validated.
    pub distance: f32,
}

impl Sample {
    pub fn new(angle_index: usize, distance: f32) -> Self {
        Self {
            angle_index,
            distance,
        }
    }

    /// Angle of this sample in radians.
    ///
    /// # Examples
    ///
    /// ```
    /// use laser_core::Sample;
    ///
    /// let s = Sample::new(180, 1.0);
    /// assert!((s.angle_radians() - std::f64::consts::PI).abs() < 1e-12);
    /// ```
    pub fn angle_radians(&self) -> f64 {
        (self.angle_index as f64).to_radians()
    }
}

impl From<(usize, f32)> for Sample {
    fn from((angle_index, distance): (usize, f32)) -> Self {
        Self::new(angle_index, distance)
    }
}
