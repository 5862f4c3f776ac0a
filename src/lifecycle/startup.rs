//! Startup orchestration.
//!
//! # Responsibilities
//! - Decode the shared secret and build the authenticator
//! - Load the image catalog
//! - Assemble the application state handed to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Everything built here is immutable for the process lifetime

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::auth::{Authenticator, Secret, SecretError};
use crate::config::ServiceConfig;
use crate::http::AppState;
use crate::resources::{CatalogSource, SourceError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid webhook secret: {0}")]
    Secret(#[from] SecretError),

    #[error("failed to load catalog: {0}")]
    Catalog(#[from] SourceError),
}

/// Build the authenticator described by `config.auth`.
pub fn build_authenticator(config: &ServiceConfig) -> Result<Authenticator, StartupError> {
    let secret = Secret::from_base64(&config.auth.secret)?;
    Ok(Authenticator::with_config(secret, &config.auth))
}

/// Build the shared application state.
pub fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let authenticator = build_authenticator(config)?;

    let source = match config.catalog.path.as_deref() {
        Some(path) => CatalogSource::from_file(Path::new(path), config.catalog.page_size)?,
        None => {
            tracing::warn!("No catalog configured, every find request will report FAILED");
            CatalogSource::empty(config.catalog.page_size)
        }
    };

    tracing::info!(
        routes = authenticator.paths().iter().count(),
        timestamp_header = %authenticator.timestamp_header(),
        signatures_header = %authenticator.signatures_header(),
        resources = source.len(),
        "Webhook state ready"
    );

    Ok(AppState {
        authenticator: Arc::new(authenticator),
        source: Arc::new(source),
        max_body_size: config.security.max_body_size,
    })
}
