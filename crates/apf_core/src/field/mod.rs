//! Gaussian potential field: point sources and the functions evaluating them.

pub mod point_source;
pub mod potential;

pub use point_source::PointSource;
pub use potential::{attractive, repulsive, total};
