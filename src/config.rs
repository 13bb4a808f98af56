use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::block::ActivationFunction;
use crate::error::Result;
use crate::loss::LossType;
use crate::network::{LayerSpec, NetworkSpec};
use crate::train::TrainConfig;

/// Hyperparameters of the product-regression experiment driven by the CLI.
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub hidden_width: usize,
    pub hidden_layers: usize,
    pub example_count: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Seeds both weight initialisation and the synthetic dataset.
    pub seed: Option<u64>,
    pub log_interval: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            hidden_width: 4,
            hidden_layers: 1,
            example_count: 50,
            epochs: 20,
            learning_rate: 1e-4,
            seed: None,
            log_interval: 1,
        }
    }
}

impl ExperimentConfig {
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// `hidden_layers` × (neurons + ReLU), then a single output neuron, L2 loss.
    pub fn network_spec(&self) -> NetworkSpec {
        let mut layers = Vec::with_capacity(self.hidden_layers * 2 + 1);
        for _ in 0..self.hidden_layers {
            layers.push(LayerSpec::Neuron { count: self.hidden_width });
            layers.push(LayerSpec::Activation { function: ActivationFunction::ReLU });
        }
        layers.push(LayerSpec::Neuron { count: 1 });
        NetworkSpec { input_dim: 2, output_dim: 1, layers, loss: LossType::L2 }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.epochs, self.learning_rate).with_log_interval(self.log_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: ExperimentConfig = serde_json::from_str(r#"{"epochs": 5, "seed": 3}"#).unwrap();
        assert_eq!(cfg.epochs, 5);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.hidden_width, 4);
        assert_eq!(cfg.learning_rate, 1e-4);
    }

    #[test]
    fn test_network_spec_shape() {
        let cfg = ExperimentConfig { hidden_layers: 2, hidden_width: 6, ..Default::default() };
        let spec = cfg.network_spec();
        assert_eq!(spec.layers.len(), 5);
        let net = spec.build(Some(0)).unwrap();
        assert_eq!(net.current_width(), 1);
    }

    #[test]
    fn test_no_hidden_layers_is_linear() {
        let cfg = ExperimentConfig { hidden_layers: 0, ..Default::default() };
        assert_eq!(cfg.network_spec().layers, vec![LayerSpec::Neuron { count: 1 }]);
    }

    #[test]
    fn test_load_json_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"learning_rate": 0.01}"#).unwrap();
        let cfg = ExperimentConfig::load_json(&path).unwrap();
        assert_eq!(cfg.learning_rate, 0.01);
        assert_eq!(cfg.train_config().epochs, 20);
    }
}
