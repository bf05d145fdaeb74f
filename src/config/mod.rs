pub mod toml_config;

use crate::domain::model::RenderMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "gps-clock")]
#[command(about = "A GPS-synchronized terminal clock")]
pub struct CliConfig {
    /// Serial device the receiver is attached to, e.g. /dev/ttyUSB0
    #[arg(long)]
    pub port: Option<String>,

    /// Receiver baud rate
    #[arg(long)]
    pub baud: Option<u32>,

    /// IANA time zone to display, e.g. America/New_York
    #[arg(long)]
    pub zone: Option<String>,

    #[arg(long, value_enum)]
    pub mode: Option<RenderMode>,

    /// Optional TOML config file; command-line flags win over it
    #[arg(long)]
    pub config: Option<String>,

    /// List available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併命令列與設定檔:旗標優先,設定檔補洞,最後才是預設值
    pub fn resolve(&self) -> Result<ClockConfig> {
        let file = match &self.config {
            Some(path) => Some(toml_config::TomlConfig::from_file(path)?),
            None => None,
        };

        let port = self.port.clone().or_else(|| {
            file.as_ref()
                .and_then(|f| f.port_path().map(str::to_string))
        });
        let port = validation::validate_required_field("serial.port", &port)?.clone();

        let baud = self
            .baud
            .or_else(|| file.as_ref().and_then(|f| f.baud_rate()))
            .unwrap_or(9600);

        let zone = self
            .zone
            .clone()
            .or_else(|| {
                file.as_ref()
                    .and_then(|f| f.time_zone().map(str::to_string))
            })
            .unwrap_or_else(|| "UTC".to_string());

        let mode = self
            .mode
            .or_else(|| file.as_ref().and_then(|f| f.render_mode()))
            .unwrap_or_default();

        Ok(ClockConfig {
            port,
            baud,
            zone,
            mode,
        })
    }
}

/// Fully resolved runtime configuration, whatever the sources were.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    pub port: String,
    pub baud: u32,
    pub zone: String,
    pub mode: RenderMode,
}

impl ConfigProvider for ClockConfig {
    fn port_path(&self) -> &str {
        &self.port
    }

    fn baud_rate(&self) -> u32 {
        self.baud
    }

    fn time_zone(&self) -> &str {
        &self.zone
    }

    fn render_mode(&self) -> RenderMode {
        self.mode
    }
}

impl Validate for ClockConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("serial.port", &self.port)?;
        validation::validate_baud_rate("serial.baud", self.baud)?;
        validation::validate_time_zone("clock.time_zone", &self.zone)?;
        Ok(())
    }
}
