/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`       : total number of full passes over the training data
/// - `learning_rate`: step size of every per-example SGD update
/// - `log_interval` : an `info!` line is emitted every `log_interval` epochs
///                     (and always for the last one); `0` disables epoch logging
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub log_interval: usize,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that logs every epoch.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            log_interval: 1,
        }
    }

    pub fn with_log_interval(mut self, log_interval: usize) -> Self {
        self.log_interval = log_interval;
        self
    }
}
