//! Signed-webhook image listing service.

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resources;

pub use auth::{AuthDecision, AuthReason, Authenticator};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
