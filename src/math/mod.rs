pub mod vector;

pub use vector::{dot, gaussian, WEIGHT_INIT_VARIANCE};
