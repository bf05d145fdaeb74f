use crate::domain::model::RenderMode;
use crate::utils::error::{ClockError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The persistent side of the configuration: the file the selected time
/// zone is written back to. Every section is optional so a minimal file
/// stays minimal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub serial: Option<SerialSection>,
    pub clock: Option<ClockSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SerialSection {
    pub port: Option<String>,
    pub baud: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClockSection {
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    pub mode: Option<RenderMode>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClockError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(ClockError::TomlError)
    }

    /// 替換環境變數 (例如 ${GPS_PORT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 寫回設定檔;時區選單改了選擇就靠這個保存
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ClockError::IoError)
    }

    pub fn set_time_zone(&mut self, zone: impl Into<String>) {
        self.clock.get_or_insert_with(Default::default).time_zone = Some(zone.into());
    }

    pub fn port_path(&self) -> Option<&str> {
        self.serial.as_ref().and_then(|s| s.port.as_deref())
    }

    pub fn baud_rate(&self) -> Option<u32> {
        self.serial.as_ref().and_then(|s| s.baud)
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.clock.as_ref().and_then(|c| c.time_zone.as_deref())
    }

    pub fn render_mode(&self) -> Option<RenderMode> {
        self.display.as_ref().and_then(|d| d.mode)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(port) = self.port_path() {
            validation::validate_non_empty_string("serial.port", port)?;
        }
        if let Some(baud) = self.baud_rate() {
            validation::validate_baud_rate("serial.baud", baud)?;
        }
        if let Some(zone) = self.time_zone() {
            validation::validate_time_zone("clock.time_zone", zone)?;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
