use rand::distributions::WeightedError;
use thiserror::Error;

use fitsynth_core::CoreError;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{items} items but {weights} weights")]
    WeightCount { items: usize, weights: usize },

    #[error("invalid sampling weights: {0}")]
    Weights(#[from] WeightedError),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
