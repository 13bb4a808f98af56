use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetError>;

/// Everything that can go wrong while building, training or persisting a network.
#[derive(Error, Debug)]
pub enum NetError {
    /// A declared width or block count was zero.
    #[error("invalid dimension for {what}: {value}")]
    InvalidDimension { what: &'static str, value: usize },

    /// Adjacent stages of the network disagree on their width.
    #[error("structural mismatch: {stage} expects width {expected}, found {found}")]
    StructuralMismatch {
        stage: String,
        expected: usize,
        found: usize,
    },

    /// A vector handed to a block, layer or network has the wrong length.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("no loss block has been set on the network")]
    MissingLoss,

    #[error("a loss block is already set on the network")]
    LossAlreadySet,

    /// Loss `forward`/`backward` was called before `set_expected_data` for the current example.
    #[error("expected data was not set for the current example")]
    MissingExpectedData,

    #[error("backward called on {0} before any forward pass")]
    BackwardBeforeForward(&'static str),

    #[error("dataset contains no examples")]
    EmptyDataset,

    #[error("CSV row {row}: {message}")]
    Csv { row: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
