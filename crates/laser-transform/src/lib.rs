//! # Laser Transform
//!
//! Polar-to-Cartesian conversion of a collected sample history, and the
//! split into x/y sequences that a renderer consumes.

mod polar;

pub use polar::{CartesianPoint, convert, split_axes};
