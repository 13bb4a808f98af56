use std::time::Instant;

use tracing::{info, warn};

use crate::data::Dataset;
use crate::error::{NetError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

/// Trains `network` for `config.epochs` epochs of per-example SGD and returns
/// the statistics of every completed epoch.
///
/// Examples are visited in dataset order; there is no shuffling and no batching.
///
/// # Errors
/// - `MissingLoss` if the network has no loss block
/// - `DimensionMismatch` if the dataset widths differ from the network's
pub fn train_loop(
    network: &mut Network,
    dataset: &Dataset,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    if network.loss().is_none() {
        return Err(NetError::MissingLoss);
    }
    check_widths(network, dataset)?;

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let train_loss = train_epoch(network, dataset, config.learning_rate)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if !train_loss.is_finite() {
            warn!(epoch, train_loss, "training loss is no longer finite");
        }

        let last = epoch == config.epochs;
        if config.log_interval > 0 && (epoch % config.log_interval == 0 || last) {
            info!(
                "Epoch {}/{}: loss = {:.6} ({} ms)",
                epoch, config.epochs, train_loss, elapsed_ms
            );
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        });
    }

    Ok(history)
}

fn check_widths(network: &Network, dataset: &Dataset) -> Result<()> {
    if dataset.input_dim() != network.input_dim() {
        return Err(NetError::DimensionMismatch {
            context: "dataset input",
            expected: network.input_dim(),
            got: dataset.input_dim(),
        });
    }
    if dataset.output_dim() != network.output_dim() {
        return Err(NetError::DimensionMismatch {
            context: "dataset expected output",
            expected: network.output_dim(),
            got: dataset.output_dim(),
        });
    }
    Ok(())
}
