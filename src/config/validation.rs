use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, PublicationConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_publication_config(&config.publication)?;
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the publication section
fn validate_publication_config(config: &PublicationConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    validate_path_segment("edition", &config.edition)?;
    validate_path_segment("slug", &config.slug)?;

    Ok(())
}

/// A value that ends up inside a URL path or a file name
fn validate_path_segment(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
    }

    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{} must be a single path segment, got '{}'",
            key, value
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.miss_threshold < 1 {
        return Err(ConfigError::Validation(
            "miss-threshold must be >= 1".to_string(),
        ));
    }

    if config.max_pages < 1 || config.max_pages > 1000 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be between 1 and 1000, got {}",
            config.max_pages
        )));
    }

    if config.date_window_days < 1 || config.date_window_days > 3650 {
        return Err(ConfigError::Validation(format!(
            "date-window-days must be between 1 and 3650, got {}",
            config.date_window_days
        )));
    }

    Ok(())
}

/// Validates transport configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.transport_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "transport-retries must be <= 10, got {}",
            config.transport_retries
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
