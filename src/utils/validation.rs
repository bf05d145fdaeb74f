use crate::utils::error::{ClockError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClockError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_baud_rate(field_name: &str, baud: u32) -> Result<()> {
    if baud == 0 {
        return Err(ClockError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: baud.to_string(),
            reason: "Baud rate must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// 時區字串必須能在 IANA 資料庫中找到
pub fn validate_time_zone(field_name: &str, zone: &str) -> Result<()> {
    validate_non_empty_string(field_name, zone)?;

    match zone.parse::<chrono_tz::Tz>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ClockError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: zone.to_string(),
            reason: "Unknown IANA time zone identifier".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ClockError::MissingConfigError {
        field: field_name.to_string(),
    })
}
