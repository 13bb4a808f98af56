use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{NetError, Result};
use crate::math::vector::{dot, gaussian, scaled, WEIGHT_INIT_VARIANCE};

/// A single linear unit: `output = dot(input, weights) + bias`.
///
/// Only the parameters are serialized; the per-example caches start empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(skip)]
    input: Option<Vec<f64>>,
    #[serde(skip)]
    output: f64,
    #[serde(skip)]
    grad_weights: Vec<f64>,
    #[serde(skip)]
    grad_bias: f64,
    #[serde(skip)]
    input_gradient: Vec<f64>,
}

impl Neuron {
    /// Weights drawn from N(0, 0.1), bias 0.
    pub fn new<R: Rng + ?Sized>(input_dim: usize, rng: &mut R) -> Neuron {
        Neuron::from_parameters(gaussian(rng, input_dim, WEIGHT_INIT_VARIANCE), 0.0)
    }

    pub fn from_parameters(weights: Vec<f64>, bias: f64) -> Neuron {
        Neuron {
            weights,
            bias,
            input: None,
            output: 0.0,
            grad_weights: Vec::new(),
            grad_bias: 0.0,
            input_gradient: Vec::new(),
        }
    }

    pub fn input(&self) -> Option<&[f64]> {
        self.input.as_deref()
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn grad_weights(&self) -> &[f64] {
        &self.grad_weights
    }

    pub fn grad_bias(&self) -> f64 {
        self.grad_bias
    }

    pub fn input_gradient(&self) -> &[f64] {
        &self.input_gradient
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.weights.len() {
            return Err(NetError::DimensionMismatch {
                context: "neuron input",
                expected: self.weights.len(),
                got: input.len(),
            });
        }
        Ok(())
    }
}

impl Block for Neuron {
    fn input_dim(&self) -> usize {
        self.weights.len()
    }

    fn evaluate(&self, input: &[f64]) -> Result<f64> {
        self.check_input(input)?;
        Ok(dot(input, &self.weights) + self.bias)
    }

    fn forward(&mut self, input: &[f64]) -> Result<f64> {
        let output = self.evaluate(input)?;
        self.input = Some(input.to_vec());
        self.output = output;
        Ok(output)
    }

    fn backward(&mut self, output_gradient: f64) -> Result<Vec<f64>> {
        let input = self
            .input
            .as_ref()
            .ok_or(NetError::BackwardBeforeForward("neuron"))?;

        self.grad_bias = output_gradient;
        self.grad_weights = scaled(input, output_gradient);
        self.input_gradient = scaled(&self.weights, output_gradient);
        Ok(self.input_gradient.clone())
    }

    fn update(&mut self, learning_rate: f64) {
        // Nothing to apply until a backward pass has filled the gradients.
        if self.grad_weights.len() != self.weights.len() {
            return;
        }
        for (w, g) in self.weights.iter_mut().zip(self.grad_weights.iter()) {
            *w -= learning_rate * g;
        }
        self.bias -= learning_rate * self.grad_bias;
    }
}
