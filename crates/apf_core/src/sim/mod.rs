//! Simulation loop and run artifacts.

pub mod driver;
pub mod trajectory;

pub use driver::{RunReport, RunStatus, Simulation};
pub use trajectory::{StepRecord, Trajectory};
