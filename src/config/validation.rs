//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval and timeout > 0, pool sizes > 0)
//! - Check both backend URLs resolve to distinct endpoints
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{BackendConfig, RouterConfig};
use crate::pool::Endpoint;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("health_check.{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("health_check.timeout_ms ({timeout_ms}) exceeds health_check.interval_ms ({interval_ms})")]
    TimeoutExceedsInterval { timeout_ms: u64, interval_ms: u64 },

    #[error("backends.{role}.url is invalid: {reason}")]
    InvalidBackendUrl { role: &'static str, reason: String },

    #[error("backends.{role}.max_connections must be greater than zero")]
    ZeroMaxConnections { role: &'static str },

    #[error("backends.{role}.name must not be empty")]
    EmptyBackendName { role: &'static str },

    #[error("primary and secondary backends both point at {endpoint}")]
    SameEndpoint { endpoint: String },

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("admin.api_key must not be empty when the admin API is enabled")]
    EmptyApiKey,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let hc = &config.health_check;
    if hc.interval_ms == 0 {
        errors.push(ValidationError::ZeroDuration { field: "interval_ms" });
    }
    if hc.timeout_ms == 0 {
        errors.push(ValidationError::ZeroDuration { field: "timeout_ms" });
    }
    if hc.interval_ms > 0 && hc.timeout_ms > hc.interval_ms {
        errors.push(ValidationError::TimeoutExceedsInterval {
            timeout_ms: hc.timeout_ms,
            interval_ms: hc.interval_ms,
        });
    }

    let primary = validate_backend("primary", &config.backends.primary, &mut errors);
    let secondary = validate_backend("secondary", &config.backends.secondary, &mut errors);
    if let (Some(p), Some(s)) = (primary, secondary) {
        if p == s {
            errors.push(ValidationError::SameEndpoint { endpoint: p.to_string() });
        }
    }

    if config.admin.enabled {
        if config.admin.api_key.trim().is_empty() {
            errors.push(ValidationError::EmptyApiKey);
        }
        if config.admin.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "admin.bind_address",
                value: config.admin.bind_address.clone(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_backend(
    role: &'static str,
    backend: &BackendConfig,
    errors: &mut Vec<ValidationError>,
) -> Option<Endpoint> {
    if backend.name.trim().is_empty() {
        errors.push(ValidationError::EmptyBackendName { role });
    }
    if backend.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections { role });
    }
    match Endpoint::parse(&backend.url) {
        Ok(endpoint) => Some(endpoint),
        Err(e) => {
            errors.push(ValidationError::InvalidBackendUrl {
                role,
                reason: e.to_string(),
            });
            None
        }
    }
}
