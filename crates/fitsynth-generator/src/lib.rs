pub mod dataset;
pub mod error;
pub mod installs;
pub mod sampling;
pub mod simulator;

pub use dataset::{Dataset, DatasetSummary};
pub use error::GeneratorError;
