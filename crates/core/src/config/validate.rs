use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - API base URL is not empty
/// - Request timeout is not 0
/// - Page size is not 0 and fits in a single request
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "api.base_url cannot be empty".to_string(),
        ));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.pagination.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "pagination.page_size cannot be 0".to_string(),
        ));
    }

    if config.pagination.max_limit < config.pagination.page_size {
        return Err(ConfigError::ValidationError(format!(
            "pagination.max_limit ({}) must be at least pagination.page_size ({})",
            config.pagination.max_limit, config.pagination.page_size
        )));
    }

    Ok(())
}
