use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::block::ActivationFunction;
use crate::data::{Dataset, Example};
use crate::error::{NetError, Result};
use crate::layers::{ActivationLayer, Layer, NeuronLayer};
use crate::loss::{Loss, LossBlock, LossType};
use crate::train::{train_loop, TrainConfig};

/// An ordered stack of layers closed by a single loss block.
///
/// Networks are assembled once with the `add_*` / `set_loss*` methods, trained in
/// place, and then used read-only through `run`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Network {
    input_dim: usize,
    output_dim: usize,
    layers: Vec<Layer>,
    loss: Option<LossBlock>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

impl Network {
    pub fn new(input_dim: usize, output_dim: usize) -> Result<Network> {
        Network::with_rng(input_dim, output_dim, entropy_rng())
    }

    /// Like `new`, but weight initialisation is reproducible.
    pub fn with_seed(input_dim: usize, output_dim: usize, seed: u64) -> Result<Network> {
        Network::with_rng(input_dim, output_dim, StdRng::seed_from_u64(seed))
    }

    fn with_rng(input_dim: usize, output_dim: usize, rng: StdRng) -> Result<Network> {
        if input_dim == 0 {
            return Err(NetError::InvalidDimension { what: "network input", value: 0 });
        }
        if output_dim == 0 {
            return Err(NetError::InvalidDimension { what: "network output", value: 0 });
        }
        Ok(Network { input_dim, output_dim, layers: Vec::new(), loss: None, rng })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn loss(&self) -> Option<&LossBlock> {
        self.loss.as_ref()
    }

    /// Width produced by the last layer, or the input width for an empty stack.
    pub fn current_width(&self) -> usize {
        self.layers.last().map_or(self.input_dim, Layer::output_dim)
    }

    // -----------------------------------------------------------------------
    // Build phase
    // -----------------------------------------------------------------------

    /// Appends `count` neurons, each connected to every output of the current width.
    pub fn add_neuron_layer(&mut self, count: usize) -> Result<&mut Self> {
        if count == 0 {
            return Err(NetError::InvalidDimension { what: "neuron layer size", value: 0 });
        }
        let layer = NeuronLayer::new(count, self.current_width(), &mut self.rng);
        self.push_layer(layer)
    }

    /// Appends a ReLU activation layer matching the current width.
    pub fn add_activation_layer(&mut self) -> Result<&mut Self> {
        self.add_activation_layer_with(ActivationFunction::ReLU)
    }

    pub fn add_activation_layer_with(&mut self, function: ActivationFunction) -> Result<&mut Self> {
        let layer = ActivationLayer::new(self.current_width(), function);
        self.push_layer(layer)
    }

    /// Appends a pre-built layer, rejecting it if its input width does not
    /// match what the stack currently produces. The stack is closed once a
    /// loss has been installed.
    pub fn push_layer(&mut self, layer: impl Into<Layer>) -> Result<&mut Self> {
        if self.loss.is_some() {
            return Err(NetError::LossAlreadySet);
        }
        let layer = layer.into();
        layer.validate()?;
        let width = self.current_width();
        if layer.input_dim() != width {
            return Err(NetError::StructuralMismatch {
                stage: format!("layer {}", self.layers.len()),
                expected: width,
                found: layer.input_dim(),
            });
        }
        debug!(
            index = self.layers.len(),
            input = layer.input_dim(),
            output = layer.output_dim(),
            "appended layer"
        );
        self.layers.push(layer);
        Ok(self)
    }

    /// Installs an L2 loss sized to the declared output width.
    pub fn set_loss(&mut self) -> Result<&mut Self> {
        self.set_loss_with(LossType::L2)
    }

    pub fn set_loss_with(&mut self, loss_type: LossType) -> Result<&mut Self> {
        if self.loss.is_some() {
            return Err(NetError::LossAlreadySet);
        }
        let width = self.current_width();
        if width != self.output_dim {
            return Err(NetError::StructuralMismatch {
                stage: "loss".to_string(),
                expected: self.output_dim,
                found: width,
            });
        }
        debug!(?loss_type, width, "installed loss");
        self.loss = Some(LossBlock::new(loss_type, self.output_dim));
        Ok(self)
    }

    /// Re-checks every structural invariant. Used after deserialisation.
    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 || self.output_dim == 0 {
            return Err(NetError::InvalidDimension {
                what: "network input/output",
                value: 0,
            });
        }
        let mut width = self.input_dim;
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate()?;
            if layer.input_dim() != width {
                return Err(NetError::StructuralMismatch {
                    stage: format!("layer {i}"),
                    expected: width,
                    found: layer.input_dim(),
                });
            }
            width = layer.output_dim();
        }
        if let Some(loss) = &self.loss {
            if loss.input_dim() != self.output_dim || width != self.output_dim {
                return Err(NetError::StructuralMismatch {
                    stage: "loss".to_string(),
                    expected: self.output_dim,
                    found: width,
                });
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Forward / backward / update
    // -----------------------------------------------------------------------

    /// Forward pass; every block remembers its input for `backward`.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.forward(&current)?;
        }
        Ok(current)
    }

    /// Forward pass that leaves all stored block state untouched.
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.evaluate(&current)?;
        }
        Ok(current)
    }

    /// Threads `loss_gradient` back through the layers in reverse order.
    pub fn backward(&mut self, loss_gradient: &[f64]) -> Result<()> {
        let width = self.current_width();
        if loss_gradient.len() != width {
            return Err(NetError::DimensionMismatch {
                context: "network loss gradient",
                expected: width,
                got: loss_gradient.len(),
            });
        }
        let mut gradient = loss_gradient.to_vec();
        for layer in self.layers.iter_mut().rev() {
            gradient = layer.backward(&gradient)?;
        }
        Ok(())
    }

    pub fn update(&mut self, learning_rate: f64) {
        for layer in &mut self.layers {
            layer.update(learning_rate);
        }
    }

    // -----------------------------------------------------------------------
    // Training and inference
    // -----------------------------------------------------------------------

    /// One stochastic gradient descent step on a single example.
    /// Returns the loss measured before the update.
    pub fn train_example(&mut self, example: &Example, learning_rate: f64) -> Result<f64> {
        if self.loss.is_none() {
            return Err(NetError::MissingLoss);
        }
        let output = self.forward(&example.input)?;
        let loss = self.loss.as_mut().ok_or(NetError::MissingLoss)?;
        loss.set_expected_data(&example.expected)?;
        let value = loss.forward(&output)?;
        let gradient = loss.backward()?;
        self.backward(&gradient)?;
        self.update(learning_rate);
        Ok(value)
    }

    /// Trains for `epochs` passes over `dataset` in dataset order and returns
    /// the mean loss of every epoch.
    pub fn train(&mut self, dataset: &Dataset, epochs: usize, learning_rate: f64) -> Result<Vec<f64>> {
        let config = TrainConfig::new(epochs, learning_rate);
        let stats = train_loop(self, dataset, &config)?;
        Ok(stats.into_iter().map(|s| s.train_loss).collect())
    }

    /// Applies the trained network to each row independently.
    pub fn run(&self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        inputs.iter().map(|row| self.evaluate(row)).collect()
    }

    /// Loss of a single example under the current parameters.
    pub fn loss_value(&self, input: &[f64], expected: &[f64]) -> Result<f64> {
        let loss = self.loss.as_ref().ok_or(NetError::MissingLoss)?;
        let output = self.evaluate(input)?;
        loss.evaluate(&output, expected)
    }

    /// Mean loss over a dataset without touching any parameters.
    pub fn mean_loss(&self, dataset: &Dataset) -> Result<f64> {
        let mut total = 0.0;
        for ex in dataset {
            total += self.loss_value(&ex.input, &ex.expected)?;
        }
        Ok(total / dataset.len() as f64)
    }

    /// (weights, bias) of every neuron, in layer order.
    pub fn parameters(&self) -> Vec<(Vec<f64>, f64)> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Neuron(l) => Some(l),
                Layer::Activation(_) => None,
            })
            .flat_map(|l| l.neurons.iter().map(|n| (n.weights.clone(), n.bias)))
            .collect()
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_dim {
            return Err(NetError::DimensionMismatch {
                context: "network input",
                expected: self.input_dim,
                got: input.len(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Serializes the architecture and parameters to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network written by `save_json` and re-validates its structure.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.validate()?;
        Ok(network)
    }
}
