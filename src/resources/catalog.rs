//! File-backed image catalog.

use std::fs;
use std::path::Path;

use async_trait::async_trait;

use crate::resources::types::{ImageEntry, PageRequest, ResourcePage, SourceError};
use crate::resources::ResourceSource;

/// An immutable, in-memory list of images loaded once at startup.
///
/// Entries without a URL are dropped on load. Newest entries (by
/// `created_at`) come first; entries without a timestamp keep their file
/// order after the dated ones. The continuation token is the decimal offset
/// of the next page.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    entries: Vec<ImageEntry>,
    page_size: usize,
}

impl CatalogSource {
    pub fn new(entries: Vec<ImageEntry>, page_size: usize) -> Self {
        let mut entries: Vec<ImageEntry> = entries.into_iter().filter(|e| e.url.is_some()).collect();
        // Stable sort keeps file order among equal timestamps.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            entries,
            page_size: page_size.max(1),
        }
    }

    pub fn empty(page_size: usize) -> Self {
        Self::new(Vec::new(), page_size)
    }

    /// Load a JSON array of entries from disk.
    pub fn from_file(path: &Path, page_size: usize) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        let entries: Vec<ImageEntry> = serde_json::from_str(&content)?;
        Ok(Self::new(entries, page_size))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn page(&self, request: &PageRequest) -> Result<ResourcePage, SourceError> {
        let offset = match request.continuation.as_deref() {
            None | Some("") => 0,
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| SourceError::InvalidContinuation(token.to_string()))?,
        };

        let start = offset.min(self.entries.len());
        let end = start.saturating_add(self.page_size).min(self.entries.len());
        let continuation = (end < self.entries.len()).then(|| end.to_string());

        Ok(ResourcePage {
            entries: self.entries[start..end].to_vec(),
            continuation,
        })
    }
}

#[async_trait]
impl ResourceSource for CatalogSource {
    async fn list(&self, request: PageRequest) -> Result<ResourcePage, SourceError> {
        self.page(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(id: &str, created_at: Option<u64>, with_url: bool) -> ImageEntry {
        ImageEntry {
            id: id.to_string(),
            name: format!("{id}.jpg"),
            url: with_url.then(|| format!("https://images.example.com/{id}.jpg")),
            thumbnail_url: None,
            content_type: None,
            created_at,
        }
    }

    fn ids(page: &ResourcePage) -> Vec<&str> {
        page.entries.iter().map(|e| e.id.as_str()).collect()
    }

    fn catalog() -> CatalogSource {
        CatalogSource::new(
            vec![
                entry("a", Some(1), true),
                entry("b", Some(5), true),
                entry("no-url", Some(9), false),
                entry("c", Some(3), true),
                entry("d", None, true),
                entry("e", Some(4), true),
            ],
            2,
        )
    }

    #[tokio::test]
    async fn test_pages_newest_first() {
        let source = catalog();
        assert_eq!(source.len(), 5);

        let first = source.list(PageRequest::default()).await.unwrap();
        assert_eq!(ids(&first), vec!["b", "e"]);
        assert_eq!(first.continuation.as_deref(), Some("2"));

        let second = source
            .list(PageRequest { continuation: first.continuation })
            .await
            .unwrap();
        assert_eq!(ids(&second), vec!["c", "a"]);
        assert_eq!(second.continuation.as_deref(), Some("4"));

        let last = source
            .list(PageRequest { continuation: second.continuation })
            .await
            .unwrap();
        assert_eq!(ids(&last), vec!["d"]);
        assert_eq!(last.continuation, None);
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let page = catalog()
            .list(PageRequest { continuation: Some("50".into()) })
            .await
            .unwrap();
        assert!(page.entries.is_empty());
        assert_eq!(page.continuation, None);
    }

    #[tokio::test]
    async fn test_invalid_continuation() {
        let err = catalog()
            .list(PageRequest { continuation: Some("next".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidContinuation(t) if t == "next"));
    }

    #[tokio::test]
    async fn test_empty_continuation_starts_over() {
        let page = catalog()
            .list(PageRequest { continuation: Some(String::new()) })
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["b", "e"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "1", "name": "one.png", "url": "https://x/1.png", "content_type": "image/png"}},
                {{"id": "2", "name": "two"}}
            ]"#
        )
        .unwrap();

        let source = CatalogSource::from_file(file.path(), 5).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.entries[0].content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            CatalogSource::from_file(file.path(), 5),
            Err(SourceError::Parse(_))
        ));
    }
}
