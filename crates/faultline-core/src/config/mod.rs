//! Configuration system for Faultline.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod analysis_config;
pub mod faultline_config;
pub mod layout_config;

pub use analysis_config::{AnalysisConfig, EngineChoice};
pub use faultline_config::FaultlineConfig;
pub use layout_config::LayoutConfig;
