pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{storage::LocalStorage, toml_config::TomlConfig, ChartJob};
pub use core::{engine::ChartEngine, pipeline::BoxPlotPipeline};
pub use domain::model::Segment;
pub use utils::error::{ChartError, Result};
