//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the connection string scheme
//! - Validate value ranges (pool size, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

const SUPPORTED_SCHEMES: [&str; 3] = ["postgres", "postgresql", "sqlite"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("database.url is empty")]
    MissingDatabaseUrl,

    #[error("unsupported database scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate the configuration, collecting every problem.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let url = config.database.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::MissingDatabaseUrl);
    } else {
        let scheme = url.split(':').next().unwrap_or_default();
        if !SUPPORTED_SCHEMES.contains(&scheme) {
            errors.push(ValidationError::UnsupportedScheme(scheme.to_string()));
        }
    }

    if config.database.max_connections == 0 {
        errors.push(ValidationError::Zero("database.max_connections"));
    }
    if config.database.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("database.connect_timeout_secs"));
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
