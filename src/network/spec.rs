use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::block::ActivationFunction;
use crate::error::Result;
use crate::loss::loss_type::LossType;
use crate::network::network::Network;

/// Describes one build step of a network specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerSpec {
    /// Fully connected layer of `count` neurons.
    Neuron { count: usize },
    /// Element-wise activation over the current width.
    Activation {
        #[serde(default)]
        function: ActivationFunction,
    },
}

/// A serializable description of a network architecture and its loss.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// trained weights; `build` replays the description through the network's
/// build operations, so a malformed spec fails exactly where a hand-written
/// build would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_dim: usize,
    pub output_dim: usize,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub loss: LossType,
}

impl NetworkSpec {
    /// Builds a freshly initialised network. `seed` makes the weights reproducible.
    pub fn build(&self, seed: Option<u64>) -> Result<Network> {
        let mut network = match seed {
            Some(seed) => Network::with_seed(self.input_dim, self.output_dim, seed)?,
            None => Network::new(self.input_dim, self.output_dim)?,
        };
        for layer in &self.layers {
            match layer {
                LayerSpec::Neuron { count } => network.add_neuron_layer(*count)?,
                LayerSpec::Activation { function } => network.add_activation_layer_with(*function)?,
            };
        }
        network.set_loss_with(self.loss)?;
        Ok(network)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
