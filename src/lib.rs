pub mod error;
pub mod math;
pub mod block;
pub mod loss;
pub mod layers;
pub mod network;
pub mod data;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{NetError, Result};
pub use block::{Activation, ActivationFunction, Block, Neuron};
pub use loss::{Loss, LossBlock, LossType};
pub use layers::{ActivationLayer, Layer, NeuronLayer};
pub use network::{LayerSpec, Network, NetworkSpec};
pub use data::{Dataset, Example};
pub use train::{train_loop, EpochStats, TrainConfig};
pub use config::ExperimentConfig;
