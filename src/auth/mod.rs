//! Inbound webhook authentication.
//!
//! # Data Flow
//! ```text
//! InboundRequest (headers, raw body, path)
//!     → freshness.rs (timestamp header within replay window)
//!     → canonical.rs (request path → signed route name)
//!     → signature.rs (HMAC over version:timestamp:route:body)
//!     → AuthDecision
//! ```
//!
//! # Design Decisions
//! - Pure function of the request and an immutable `Authenticator`
//! - Rejections are values, never errors or panics
//! - Secret and computed digests never reach the logs

pub mod canonical;
pub mod freshness;
pub mod headers;
pub mod signature;

use std::fmt;

use crate::config::AuthConfig;

pub use canonical::CanonicalPaths;
pub use headers::HeaderLookup;
pub use signature::{Secret, SecretError, SignedMessage};

/// The parts of an HTTP request the authenticator looks at.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    pub headers: &'a HeaderLookup,
    /// Body bytes exactly as received on the wire.
    pub raw_body: &'a [u8],
    /// URI path, without query string.
    pub path: &'a str,
}

/// Why a request was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthReason {
    Ok,
    StaleTimestamp,
    UnknownPath,
    BadSignature,
    MissingHeader,
}

impl AuthReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthReason::Ok => "ok",
            AuthReason::StaleTimestamp => "stale_timestamp",
            AuthReason::UnknownPath => "unknown_path",
            AuthReason::BadSignature => "bad_signature",
            AuthReason::MissingHeader => "missing_header",
        }
    }
}

impl fmt::Display for AuthReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthDecision {
    pub accepted: bool,
    pub reason: AuthReason,
    /// Canonical route, set once path resolution has succeeded.
    pub canonical_path: Option<String>,
}

impl AuthDecision {
    fn accept(canonical_path: &str) -> Self {
        Self {
            accepted: true,
            reason: AuthReason::Ok,
            canonical_path: Some(canonical_path.to_string()),
        }
    }

    fn reject(reason: AuthReason) -> Self {
        Self {
            accepted: false,
            reason,
            canonical_path: None,
        }
    }
}

/// Verifies that webhook requests come from the calling platform.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Authenticator {
    secret: Secret,
    paths: CanonicalPaths,
    timestamp_header: String,
    signatures_header: String,
    version: String,
    leniency_secs: f64,
    report_missing_headers: bool,
}

impl Authenticator {
    /// Authenticator with the default headers, version, leniency and routes.
    pub fn new(secret: Secret) -> Self {
        Self::with_config(secret, &AuthConfig::default())
    }

    /// Authenticator using the header names, routes and window from `config`.
    /// The secret is passed separately since it has already been decoded.
    pub fn with_config(secret: Secret, config: &AuthConfig) -> Self {
        Self {
            secret,
            paths: CanonicalPaths::new(config.canonical_paths.iter().cloned()),
            timestamp_header: config.timestamp_header.clone(),
            signatures_header: config.signatures_header.clone(),
            version: config.signature_version.clone(),
            leniency_secs: config.leniency_secs,
            report_missing_headers: config.report_missing_headers,
        }
    }

    pub fn paths(&self) -> &CanonicalPaths {
        &self.paths
    }

    pub fn timestamp_header(&self) -> &str {
        &self.timestamp_header
    }

    pub fn signatures_header(&self) -> &str {
        &self.signatures_header
    }

    /// Authenticate against the current wall clock.
    pub fn authenticate(&self, request: &InboundRequest<'_>) -> AuthDecision {
        self.authenticate_at(request, freshness::now_secs())
    }

    /// Authenticate as if the request was received at `now_secs`.
    pub fn authenticate_at(&self, request: &InboundRequest<'_>, now_secs: f64) -> AuthDecision {
        let timestamp = request.headers.get(&self.timestamp_header);
        if timestamp.is_none() && self.report_missing_headers {
            return AuthDecision::reject(AuthReason::MissingHeader);
        }
        let timestamp = match timestamp {
            Some(ts) if freshness::is_fresh(Some(ts), now_secs, self.leniency_secs) => ts,
            _ => return AuthDecision::reject(AuthReason::StaleTimestamp),
        };

        let Some(canonical_path) = self.paths.resolve(request.path) else {
            return AuthDecision::reject(AuthReason::UnknownPath);
        };

        let presented = request.headers.get(&self.signatures_header);
        if presented.is_none() && self.report_missing_headers {
            return AuthDecision::reject(AuthReason::MissingHeader);
        }
        let message = SignedMessage::new(&self.version, timestamp, canonical_path, request.raw_body);
        match presented {
            Some(presented) if signature::verify_signature(&self.secret, &message, presented) => {
                AuthDecision::accept(canonical_path)
            }
            _ => AuthDecision::reject(AuthReason::BadSignature),
        }
    }

    /// Signature the platform would send for this request.
    pub fn sign(&self, timestamp: &str, canonical_path: &str, raw_body: &[u8]) -> String {
        self.secret
            .sign(&SignedMessage::new(&self.version, timestamp, canonical_path, raw_body))
    }
}
