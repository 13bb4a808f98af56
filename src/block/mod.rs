pub mod activation;
pub mod neuron;

pub use activation::{Activation, ActivationFunction};
pub use neuron::Neuron;

use crate::error::Result;

/// The atomic unit of computation: a function from `input_dim()` scalars to one scalar.
///
/// A block remembers the input and output of its most recent `forward` call and the
/// input gradient of its most recent `backward` call. Only one example is held at a time.
pub trait Block {
    fn input_dim(&self) -> usize;

    /// Computes the output without touching any stored state.
    fn evaluate(&self, input: &[f64]) -> Result<f64>;

    /// Computes the output and remembers `input` for the following `backward`.
    fn forward(&mut self, input: &[f64]) -> Result<f64>;

    /// Propagates `output_gradient` back through the block, returning the gradient
    /// with respect to each input of the last `forward`.
    fn backward(&mut self, output_gradient: f64) -> Result<Vec<f64>>;

    /// Applies the gradients of the last `backward`. Parameterless blocks do nothing.
    fn update(&mut self, _learning_rate: f64) {}
}
