pub mod loss_block;
pub mod loss_type;

pub use loss_block::LossBlock;
pub use loss_type::LossType;

use crate::error::Result;

/// Terminal block of a network: compares its input with externally supplied
/// expected data and produces a scalar.
pub trait Loss {
    fn input_dim(&self) -> usize;

    /// Stores the ground truth for the next `forward`. Must be called once per example.
    fn set_expected_data(&mut self, expected: &[f64]) -> Result<()>;

    fn forward(&mut self, input: &[f64]) -> Result<f64>;

    /// Gradient of the last `forward` with respect to its input.
    fn backward(&mut self) -> Result<Vec<f64>>;
}
