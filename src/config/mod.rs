//! JSON configuration of the demo binary.

pub mod radon;

pub use radon::{load_config, RadonDemoConfig, RadonOutputConfig};
