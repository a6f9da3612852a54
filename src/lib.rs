pub mod config;
pub mod cs;
pub mod error;

pub use config::ExperimentConfig;
pub use cs::graph;
pub use error::{GraphError, Result};
