use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Upstream timeout must be positive: {field} = 0")]
    InvalidTimeout { field: &'static str },

    #[error("Upstream user agent must not be empty")]
    EmptyUserAgent,
}

/// Validate the entire configuration
///
/// Aggregation configurations are never rejected here: one whose upstreams
/// all canonicalize away or fail to answer simply binds nothing and serves
/// empty results. Only client settings that would fail deep inside reqwest
/// are checked up front.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.upstream.connect_timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "connect_timeout_secs",
        });
    }
    if config.upstream.request_timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "request_timeout_secs",
        });
    }
    if config.upstream.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }
    Ok(())
}
