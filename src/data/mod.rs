pub mod csv;
pub mod dataset;
pub mod synthetic;

pub use dataset::{Dataset, Example};
