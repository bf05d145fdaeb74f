use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Serial port error: {0}")]
    SerialError(#[from] serialport::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ClockError {
    /// 針對常見的啟動錯誤給出可操作的建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            ClockError::SerialError(_) => {
                "Check the device path and that no other program holds the port \
                 (try --list-ports)"
                    .to_string()
            }
            ClockError::InvalidConfigValueError { field, .. } if field.contains("zone") => {
                "Use an IANA zone identifier such as America/New_York or UTC".to_string()
            }
            ClockError::MissingConfigError { field } => {
                format!("Provide {} on the command line or in the config file", field)
            }
            _ => "Check the configuration file and command-line flags".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClockError>;
