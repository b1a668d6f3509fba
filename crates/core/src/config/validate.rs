use super::{types::Config, ConfigError};

/// Largest page the catalog API will serve.
const MAX_PAGE_SIZE: u32 = 50;

/// Validate configuration
/// Currently validates:
/// - Catalog page size is within 1..=50
/// - Request timeouts, throttle window and poll interval are not 0
/// - A fixed listen port is within 1..=65534
/// - Endpoint URLs are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.page_size == 0 || config.catalog.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "catalog.page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    if config.catalog.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.url cannot be empty".to_string(),
        ));
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.download.throttle_ms == 0 {
        return Err(ConfigError::ValidationError(
            "download.throttle_ms cannot be 0".to_string(),
        ));
    }

    if config.download.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "download.poll_interval_ms cannot be 0".to_string(),
        ));
    }

    if matches!(config.download.listen_port, Some(0) | Some(u16::MAX)) {
        return Err(ConfigError::ValidationError(
            "download.listen_port must be between 1 and 65534".to_string(),
        ));
    }

    if config.farewell.enabled {
        if config.farewell.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "farewell.url cannot be empty".to_string(),
            ));
        }
        if config.farewell.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "farewell.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
