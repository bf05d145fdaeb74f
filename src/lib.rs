pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{toml_config::TomlConfig, ClockConfig};

pub use adapters::{serial::SerialByteSource, terminal::TerminalDisplay};
pub use crate::core::{engine::ClockEngine, reader::SentenceReader, synchronizer::TimeSynchronizer};
pub use domain::model::{LocalizedTime, RenderMode, RmcData, Sentence, ZoneSelection};
pub use utils::error::{ClockError, Result};
