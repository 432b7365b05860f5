#![forbid(unsafe_code)]

pub mod fixtures;
pub mod model;
pub mod tracker;

pub use tracker::{Tracker, TrackerError};
