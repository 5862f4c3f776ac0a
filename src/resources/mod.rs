//! Image resource listing.
//!
//! # Data Flow
//! ```text
//! authenticated find request (raw body)
//!     → FindRequest { continuation }
//!     → ResourceSource::list (one page)
//!     → Resource (wire shape) per entry with a URL
//!     → FindResponse (SUCCESS | FAILED)
//! ```
//!
//! # Design Decisions
//! - The listing backend sits behind `ResourceSource` so the HTTP layer
//!   never knows where images live
//! - An empty page is reported as FAILED, matching the platform contract

pub mod catalog;
pub mod types;

use async_trait::async_trait;

pub use catalog::CatalogSource;
pub use types::{FindRequest, FindResponse, ImageEntry, PageRequest, Resource, ResourcePage, SourceError};

/// A paginated source of image entries.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch the page identified by `request.continuation`.
    async fn list(&self, request: PageRequest) -> Result<ResourcePage, SourceError>;
}

/// Resolve one find request against `source`.
pub async fn find_resources(source: &dyn ResourceSource, request: FindRequest) -> FindResponse {
    let page = match source
        .list(PageRequest {
            continuation: request.continuation,
        })
        .await
    {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(error = %e, "Resource listing failed");
            return FindResponse::failed();
        }
    };

    let resources: Vec<Resource> = page
        .entries
        .into_iter()
        .filter_map(Resource::from_entry)
        .collect();

    if resources.is_empty() {
        tracing::info!("No resources found");
        return FindResponse::failed();
    }

    FindResponse::Success {
        continuation: page.continuation,
        resources,
    }
}
