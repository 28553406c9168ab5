use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Backend URL is http(s)
/// - Backend port and timeout are not 0
/// - Poller interval is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = &config.backend.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "backend.url must start with http:// or https://, got '{}'",
            url
        )));
    }

    if config.backend.port == 0 {
        return Err(ConfigError::ValidationError(
            "backend.port cannot be 0".to_string(),
        ));
    }

    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs cannot be 0".to_string(),
        ));
    }

    // A zero interval would turn the poller into a busy loop
    if config.poller.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "poller.interval_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
