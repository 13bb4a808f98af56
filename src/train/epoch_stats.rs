use serde::{Serialize, Deserialize};

/// Per-epoch training statistics produced by `train_loop`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean loss over all examples of this epoch, measured before each update.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}
