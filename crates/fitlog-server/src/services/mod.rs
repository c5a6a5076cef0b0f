//! Services

pub mod tracker;

pub use tracker::{NewExercise, TrackerService};
