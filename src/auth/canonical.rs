//! Canonical path resolution.
//!
//! The calling platform signs a logical route name, not the deployed URL.
//! Requests may arrive behind any prefix, so the logical name is recovered by
//! suffix match against an ordered allow-list.
//!
//! # Design Decisions
//! - Ordered list, first match wins
//! - Case-sensitive, like path matching in the router
//! - No match is an explicit `None`, never a default route

/// Route suffixes the platform signs, in match order.
pub const DEFAULT_CANONICAL_PATHS: &[&str] = &[
    "/configuration",
    "/configuration/delete",
    "/content/resources/find",
    "/editing/image/process",
    "/editing/image/process/get",
    "/publish/resources/find",
    "/publish/resources/get",
    "/publish/resources/upload",
];

/// Canonical route used by the resource listing handler.
pub const FIND_RESOURCES: &str = "/content/resources/find";

/// Ordered allow-list of canonical path suffixes.
#[derive(Debug, Clone)]
pub struct CanonicalPaths {
    suffixes: Vec<String>,
}

impl CanonicalPaths {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve the canonical route for a request path (query excluded).
    pub fn resolve(&self, request_path: &str) -> Option<&str> {
        self.suffixes
            .iter()
            .find(|suffix| request_path.ends_with(suffix.as_str()))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

impl Default for CanonicalPaths {
    fn default() -> Self {
        Self::new(DEFAULT_CANONICAL_PATHS.iter().copied())
    }
}
