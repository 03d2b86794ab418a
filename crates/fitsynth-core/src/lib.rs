pub mod config;
pub mod error;
pub mod model;
pub mod probabilities;
pub mod timestamp;

pub use config::{Config, GeneratorConfig};
pub use error::CoreError;
