use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::block::{Block, Neuron};
use crate::error::{NetError, Result};
use crate::math::vector::add_assign;

/// A fully connected stage: every neuron sees the whole input vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronLayer {
    pub input_dim: usize,
    pub neurons: Vec<Neuron>,
}

impl NeuronLayer {
    pub fn new<R: Rng + ?Sized>(count: usize, input_dim: usize, rng: &mut R) -> NeuronLayer {
        let neurons = (0..count).map(|_| Neuron::new(input_dim, &mut *rng)).collect();
        NeuronLayer { input_dim, neurons }
    }

    /// Builds a layer from explicit (weights, bias) pairs.
    pub fn from_parameters(input_dim: usize, params: Vec<(Vec<f64>, f64)>) -> Result<NeuronLayer> {
        let neurons = params
            .into_iter()
            .map(|(w, b)| Neuron::from_parameters(w, b))
            .collect();
        let layer = NeuronLayer { input_dim, neurons };
        layer.validate()?;
        Ok(layer)
    }

    pub fn output_dim(&self) -> usize {
        self.neurons.len()
    }

    /// Every neuron must take exactly `input_dim` inputs.
    pub fn validate(&self) -> Result<()> {
        if self.neurons.is_empty() {
            return Err(NetError::InvalidDimension { what: "neuron layer size", value: 0 });
        }
        for (i, neuron) in self.neurons.iter().enumerate() {
            if neuron.input_dim() != self.input_dim {
                return Err(NetError::StructuralMismatch {
                    stage: format!("neuron {i} of neuron layer"),
                    expected: self.input_dim,
                    found: neuron.input_dim(),
                });
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        self.neurons.iter().map(|n| n.evaluate(input)).collect()
    }

    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        self.neurons.iter_mut().map(|n| n.forward(input)).collect()
    }

    /// Every neuron read the same input, so their input gradients add up.
    /// The sum is intentionally not normalised by the neuron count.
    pub fn backward(&mut self, output_gradient: &[f64]) -> Result<Vec<f64>> {
        if output_gradient.len() != self.neurons.len() {
            return Err(NetError::DimensionMismatch {
                context: "neuron layer output gradient",
                expected: self.neurons.len(),
                got: output_gradient.len(),
            });
        }
        let mut input_gradient = vec![0.0; self.input_dim];
        for (neuron, &g) in self.neurons.iter_mut().zip(output_gradient.iter()) {
            add_assign(&mut input_gradient, &neuron.backward(g)?);
        }
        Ok(input_gradient)
    }

    pub fn update(&mut self, learning_rate: f64) {
        for neuron in &mut self.neurons {
            neuron.update(learning_rate);
        }
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_dim {
            return Err(NetError::DimensionMismatch {
                context: "neuron layer input",
                expected: self.input_dim,
                got: input.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_layer() -> NeuronLayer {
        NeuronLayer::from_parameters(
            2,
            vec![(vec![1.0, 2.0], 0.5), (vec![-1.0, 0.5], 0.0), (vec![0.0, 3.0], -1.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_forward_shapes() {
        let mut layer = NeuronLayer::new(4, 3, &mut StdRng::seed_from_u64(0));
        assert_eq!(layer.output_dim(), 4);
        assert_eq!(layer.forward(&[1.0, 2.0, 3.0]).unwrap().len(), 4);
    }

    #[test]
    fn test_forward_values() {
        let mut layer = fixed_layer();
        let out = layer.forward(&[2.0, 1.0]).unwrap();
        assert_eq!(out, vec![4.5, -1.5, 2.0]);
        assert_eq!(layer.evaluate(&[2.0, 1.0]).unwrap(), out);
    }

    #[test]
    fn test_backward_sums_neuron_gradients() {
        let mut layer = fixed_layer();
        layer.forward(&[2.0, 1.0]).unwrap();
        let g = [1.0, 2.0, -1.0];
        let grad = layer.backward(&g).unwrap();
        // column sums of g_k * w_k
        assert_abs_diff_eq!(grad[0], 1.0 * 1.0 + 2.0 * -1.0 + -1.0 * 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grad[1], 1.0 * 2.0 + 2.0 * 0.5 + -1.0 * 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_backward_rejects_wrong_gradient_width() {
        let mut layer = fixed_layer();
        layer.forward(&[2.0, 1.0]).unwrap();
        assert!(layer.backward(&[1.0]).is_err());
    }

    #[test]
    fn test_from_parameters_rejects_ragged_weights() {
        let err = NeuronLayer::from_parameters(2, vec![(vec![1.0, 2.0], 0.0), (vec![1.0], 0.0)]);
        assert!(matches!(err, Err(NetError::StructuralMismatch { expected: 2, found: 1, .. })));
    }
}
