//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::auth::canonical::DEFAULT_CANONICAL_PATHS;
use crate::auth::freshness::DEFAULT_LENIENCY_SECS;
use crate::auth::signature::SIGNATURE_VERSION;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Webhook authentication settings.
    pub auth: AuthConfig,

    /// Image catalog backing the find endpoint.
    pub catalog: CatalogConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Webhook authentication configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base64 shared secret issued by the calling platform.
    /// Usually supplied through `WEBHOOK_SECRET` instead of the file.
    pub secret: String,

    /// Header carrying the sender's timestamp (seconds since epoch).
    pub timestamp_header: String,

    /// Header carrying one or more hex signatures.
    pub signatures_header: String,

    /// Replay window in seconds (exclusive).
    pub leniency_secs: f64,

    /// Literal prefixed to every signed message.
    pub signature_version: String,

    /// Route suffixes accepted for signing, first match wins.
    pub canonical_paths: Vec<String>,

    /// Report absent auth headers as `missing_header` rather than
    /// folding them into `stale_timestamp` / `bad_signature`.
    pub report_missing_headers: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            timestamp_header: "X-Canva-Timestamp".to_string(),
            signatures_header: "X-Canva-Signatures".to_string(),
            leniency_secs: DEFAULT_LENIENCY_SECS,
            signature_version: SIGNATURE_VERSION.to_string(),
            canonical_paths: DEFAULT_CANONICAL_PATHS.iter().map(|p| p.to_string()).collect(),
            report_missing_headers: false,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("timestamp_header", &self.timestamp_header)
            .field("signatures_header", &self.signatures_header)
            .field("leniency_secs", &self.leniency_secs)
            .field("signature_version", &self.signature_version)
            .field("canonical_paths", &self.canonical_paths)
            .field("report_missing_headers", &self.report_missing_headers)
            .finish()
    }
}

/// Image catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file listing the image resources. Empty catalog when unset.
    pub path: Option<String>,

    /// Resources returned per page.
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: 5,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
