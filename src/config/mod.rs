//! JSON configuration of the command-line tool.

pub mod analysis;

pub use analysis::{load_config, AnalysisConfig, OutputConfig};
