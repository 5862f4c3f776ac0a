//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use drive_image_finder::auth::Authenticator;
use drive_image_finder::config::ServiceConfig;
use drive_image_finder::http::{AppState, HttpServer};
use drive_image_finder::lifecycle::startup::build_authenticator;
use drive_image_finder::lifecycle::Shutdown;
use drive_image_finder::resources::{CatalogSource, ImageEntry};
use tokio::net::TcpListener;

/// base64("secret")
pub const SECRET: &str = "c2VjcmV0";

pub const FIND: &str = "/content/resources/find";

pub struct TestServer {
    pub addr: SocketAddr,
    pub authenticator: Arc<Authenticator>,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST `body` to `path`, signed over `canonical` at `timestamp`.
    pub async fn post_signed(
        &self,
        path: &str,
        canonical: &str,
        timestamp: &str,
        body: &str,
    ) -> reqwest::Response {
        let signature = self.authenticator.sign(timestamp, canonical, body.as_bytes());
        self.post_with(path, Some(timestamp), Some(&signature), body).await
    }

    pub async fn post_with(
        &self,
        path: &str,
        timestamp: Option<&str>,
        signatures: Option<&str>,
        body: &str,
    ) -> reqwest::Response {
        let mut req = self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body.to_string());
        if let Some(ts) = timestamp {
            req = req.header("X-Canva-Timestamp", ts);
        }
        if let Some(sigs) = signatures {
            req = req.header("X-Canva-Signatures", sigs);
        }
        req.send().await.expect("server unreachable")
    }
}

pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn image(id: &str, created_at: u64) -> ImageEntry {
    ImageEntry {
        id: id.to_string(),
        name: format!("{id}.jpg"),
        url: Some(format!("https://images.example.com/{id}.jpg")),
        thumbnail_url: Some(format!("https://images.example.com/thumbs/{id}.jpg")),
        content_type: None,
        created_at: Some(created_at),
    }
}

pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.auth.secret = SECRET.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.security.max_body_size = 16 * 1024;
    config
}

/// Boot the real server on an ephemeral port.
pub async fn start_server(config: ServiceConfig, images: Vec<ImageEntry>) -> TestServer {
    let authenticator = Arc::new(build_authenticator(&config).expect("valid secret"));
    let state = AppState {
        authenticator: authenticator.clone(),
        source: Arc::new(CatalogSource::new(images, config.catalog.page_size)),
        max_body_size: config.security.max_body_size,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, state);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        authenticator,
        shutdown,
        client,
    }
}
