//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (leniency > 0, page size bounds)
//! - Check the secret decodes and the route allow-list is usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::auth::signature::{Secret, SecretError};
use crate::config::schema::ServiceConfig;

pub const MAX_PAGE_SIZE: usize = 100;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("auth.secret is unusable: {0}")]
    Secret(#[from] SecretError),

    #[error("auth.{0} must not be empty")]
    EmptyField(&'static str),

    #[error("auth.leniency_secs must be a positive number, got {0}")]
    Leniency(f64),

    #[error("auth.canonical_paths entry {0:?} must start with '/'")]
    CanonicalPathPrefix(String),

    #[error("auth.canonical_paths entry {0:?} is listed twice")]
    CanonicalPathDuplicate(String),

    #[error("catalog.page_size must be between 1 and 100, got {0}")]
    PageSize(usize),

    #[error("security.max_body_size must be greater than zero")]
    BodyLimit,

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,
}

/// Validate a fully loaded configuration (environment overrides applied).
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let auth = &config.auth;
    if let Err(e) = Secret::from_base64(&auth.secret) {
        errors.push(ValidationError::Secret(e));
    }
    if auth.timestamp_header.trim().is_empty() {
        errors.push(ValidationError::EmptyField("timestamp_header"));
    }
    if auth.signatures_header.trim().is_empty() {
        errors.push(ValidationError::EmptyField("signatures_header"));
    }
    if auth.signature_version.is_empty() {
        errors.push(ValidationError::EmptyField("signature_version"));
    }
    if !(auth.leniency_secs.is_finite() && auth.leniency_secs > 0.0) {
        errors.push(ValidationError::Leniency(auth.leniency_secs));
    }
    if auth.canonical_paths.is_empty() {
        errors.push(ValidationError::EmptyField("canonical_paths"));
    }
    let mut seen = HashSet::new();
    for path in &auth.canonical_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::CanonicalPathPrefix(path.clone()));
        }
        if !seen.insert(path.as_str()) {
            errors.push(ValidationError::CanonicalPathDuplicate(path.clone()));
        }
    }

    if !(1..=MAX_PAGE_SIZE).contains(&config.catalog.page_size) {
        errors.push(ValidationError::PageSize(config.catalog.page_size));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::BodyLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
