//! Resource listing types and wire format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One image entry as known to a resource source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub id: String,
    pub name: String,
    /// Full-size image URL. Entries without one are never listed.
    #[serde(default)]
    pub url: Option<String>,
    /// Defaults to `url` when absent.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Creation time in seconds since epoch; newest entries page first.
    #[serde(default)]
    pub created_at: Option<u64>,
}

/// A request for one page of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Opaque token returned with the previous page.
    pub continuation: Option<String>,
}

/// One page of resources plus the token for the next page.
#[derive(Debug, Clone, Default)]
pub struct ResourcePage {
    pub entries: Vec<ImageEntry>,
    pub continuation: Option<String>,
}

/// Errors from a resource source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid continuation token {0:?}")]
    InvalidContinuation(String),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Body of a find request. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindRequest {
    #[serde(default)]
    pub continuation: Option<String>,
}

/// Body of a find response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindResponse {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        continuation: Option<String>,
        resources: Vec<Resource>,
    },
    Failed {
        #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
        error_code: Option<&'static str>,
    },
}

impl FindResponse {
    pub fn failed() -> Self {
        FindResponse::Failed { error_code: None }
    }

    pub fn failed_with(code: &'static str) -> Self {
        FindResponse::Failed {
            error_code: Some(code),
        }
    }
}

/// A listed image resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub name: String,
    pub thumbnail: Thumbnail,
    pub url: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub url: String,
}

impl Resource {
    /// Shape a catalog entry for the wire. `None` when it has no URL.
    pub fn from_entry(entry: ImageEntry) -> Option<Self> {
        let url = entry.url?;
        Some(Self {
            kind: "IMAGE",
            id: entry.id,
            name: entry.name,
            thumbnail: Thumbnail {
                url: entry.thumbnail_url.unwrap_or_else(|| url.clone()),
            },
            url,
            content_type: entry
                .content_type
                .unwrap_or_else(|| "image/jpeg".to_string()),
        })
    }
}
