//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the base64 shared secret.
pub const SECRET_ENV: &str = "WEBHOOK_SECRET";

/// Environment variable overriding the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {name} value {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file without validating it.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret) = lookup(SECRET_ENV).filter(|s| !s.trim().is_empty()) {
        config.auth.secret = secret;
    }

    if let Some(port) = lookup(PORT_ENV) {
        let port: u16 = port.trim().parse().map_err(|_| ConfigError::Env {
            name: PORT_ENV,
            value: port.clone(),
        })?;
        set_port(config, port)?;
    }

    Ok(())
}

/// Replace the port of the listener's bind address.
pub fn set_port(config: &mut ServiceConfig, port: u16) -> Result<(), ConfigError> {
    let mut addr: SocketAddr =
        config
            .listener
            .bind_address
            .parse()
            .map_err(|_| ConfigError::Env {
                name: PORT_ENV,
                value: config.listener.bind_address.clone(),
            })?;
    addr.set_port(port);
    config.listener.bind_address = addr.to_string();
    Ok(())
}

/// Load configuration from an optional file, apply process environment
/// overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_read_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[auth]
secret = "c2VjcmV0"
leniency_secs = 60
canonical_paths = ["/content/resources/find"]

[catalog]
page_size = 10
"#
        )
        .unwrap();

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.auth.secret, "c2VjcmV0");
        assert_eq!(config.auth.leniency_secs, 60.0);
        assert_eq!(config.auth.canonical_paths, vec!["/content/resources/find"]);
        assert_eq!(config.auth.timestamp_header, "X-Canva-Timestamp");
        assert_eq!(config.catalog.page_size, 10);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let mut config: ServiceConfig =
            toml::from_str(include_str!("../../drive-image-finder.example.toml")).unwrap();
        let defaults = ServiceConfig::default();

        assert_eq!(config.auth.canonical_paths, defaults.auth.canonical_paths);
        assert_eq!(config.auth.leniency_secs, defaults.auth.leniency_secs);
        assert_eq!(config.security.max_body_size, defaults.security.max_body_size);

        config.auth.secret = "c2VjcmV0".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[auth\nsecret = 1").unwrap();
        assert!(matches!(read_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[(SECRET_ENV, "c2VjcmV0"), (PORT_ENV, "8088")]),
        )
        .unwrap();

        assert_eq!(config.auth.secret, "c2VjcmV0");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8088");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_blank_secret_env_keeps_file_value() {
        let mut config = ServiceConfig::default();
        config.auth.secret = "ZmlsZQ==".to_string();
        apply_env_overrides(&mut config, env(&[(SECRET_ENV, "  ")])).unwrap();
        assert_eq!(config.auth.secret, "ZmlsZQ==");
    }

    #[test]
    fn test_bad_port() {
        let mut config = ServiceConfig::default();
        let err = apply_env_overrides(&mut config, env(&[(PORT_ENV, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: PORT_ENV, .. }));
    }

    #[test]
    fn test_validation_error_message_lists_all() {
        let err = ConfigError::Validation(vec![
            ValidationError::EmptyField("timestamp_header"),
            ValidationError::PageSize(0),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("timestamp_header"));
        assert!(msg.contains("page_size"));
    }
}
