use crate::utils::error::{Result, ServiceError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: &str) -> ServiceError {
    ServiceError::ConfigError {
        message: format!("{} = '{}': {}", field_name, value, reason),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(invalid(field_name, "0", "Port must be between 1 and 65535"));
    }
    Ok(())
}

/// Authorities end up inside identifiers, so the separators are reserved.
pub fn validate_authority(field_name: &str, authority: &str) -> Result<()> {
    validate_non_empty_string(field_name, authority)?;
    if authority.contains(':') || authority.contains('@') {
        return Err(invalid(
            field_name,
            authority,
            "Authority cannot contain ':' or '@'",
        ));
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(invalid(
            field_name,
            level,
            &format!("Unsupported level. Valid levels: {}", valid_levels.join(", ")),
        ));
    }
    Ok(())
}
