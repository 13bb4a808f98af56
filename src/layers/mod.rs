pub mod activation_layer;
pub mod neuron_layer;

pub use activation_layer::ActivationLayer;
pub use neuron_layer::NeuronLayer;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One stage of a network. The set of layer kinds is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Neuron(NeuronLayer),
    Activation(ActivationLayer),
}

impl Layer {
    pub fn input_dim(&self) -> usize {
        match self {
            Layer::Neuron(l) => l.input_dim,
            Layer::Activation(l) => l.width(),
        }
    }

    pub fn output_dim(&self) -> usize {
        match self {
            Layer::Neuron(l) => l.output_dim(),
            Layer::Activation(l) => l.width(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Layer::Neuron(l) => l.validate(),
            Layer::Activation(_) => Ok(()),
        }
    }

    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        match self {
            Layer::Neuron(l) => l.evaluate(input),
            Layer::Activation(l) => l.evaluate(input),
        }
    }

    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        match self {
            Layer::Neuron(l) => l.forward(input),
            Layer::Activation(l) => l.forward(input),
        }
    }

    pub fn backward(&mut self, output_gradient: &[f64]) -> Result<Vec<f64>> {
        match self {
            Layer::Neuron(l) => l.backward(output_gradient),
            Layer::Activation(l) => l.backward(output_gradient),
        }
    }

    pub fn update(&mut self, learning_rate: f64) {
        if let Layer::Neuron(l) = self {
            l.update(learning_rate);
        }
    }
}

impl From<NeuronLayer> for Layer {
    fn from(layer: NeuronLayer) -> Self {
        Layer::Neuron(layer)
    }
}

impl From<ActivationLayer> for Layer {
    fn from(layer: ActivationLayer) -> Self {
        Layer::Activation(layer)
    }
}
