//! Element data and geometric helpers shared by the readers and the volume estimator.

pub mod elements;
pub mod geometry;
