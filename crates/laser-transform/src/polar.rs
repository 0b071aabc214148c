//! # Polar
//!
//! Stateless mapping from (angle in degrees, distance) samples to planar points.
//! Degenerate distances (zero, negative, NaN, infinite) are not filtered and
//! pass through to the output unchanged.

use laser_core::Sample;
use serde::{Deserialize, Serialize};

/// Planar point in the sensor frame, x along 0°, y along 90°.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
}

impl CartesianPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` along the ray at `angle_deg` degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use laser_transform::CartesianPoint;
    ///
    /// let p = CartesianPoint::from_polar(90.0, 2.0);
    /// assert!(p.x.abs() < 1e-12);
    /// assert!((p.y - 2.0).abs() < 1e-12);
    /// ```
    pub fn from_polar(angle_deg: f64, distance: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self {
            x: distance * angle.cos(),
            y: distance * angle.sin(),
        }
    }

    /// Euclidean distance from the origin.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl From<&Sample> for CartesianPoint {
    fn from(sample: &Sample) -> Self {
        Self::from_polar(sample.angle_index as f64, f64::from(sample.distance))
    }
}

impl From<Sample> for CartesianPoint {
    fn from(sample: Sample) -> Self {
        Self::from(&sample)
    }
}

/// Convert every sample to a point, preserving length and order.
pub fn convert(samples: &[Sample]) -> Vec<CartesianPoint> {
    samples.iter().map(CartesianPoint::from).collect()
}

/// Split points into equal-length, order-correlated x and y sequences.
pub fn split_axes(points: &[CartesianPoint]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}
