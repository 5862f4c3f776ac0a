//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, limits, timeout, trace)
//!     → middleware/webhook_auth.rs (buffer raw body, authenticate)
//!     → handlers.rs (dispatch on canonical route)
//!     → resources (one page of images)
//!     → response.rs (JSON shapes)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
