//! Case-insensitive header lookup.
//!
//! # Design Decisions
//! - Built once per request from the transport's header collection
//! - Names normalized to lowercase; values kept byte-for-byte
//! - Values that are not valid text are treated as absent
//! - Repeated headers fold into one comma-joined value, in arrival order

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use axum::http::HeaderMap;

/// Request headers keyed by lowercase name.
#[derive(Debug, Clone, Default)]
pub struct HeaderLookup {
    entries: HashMap<String, String>,
}

impl HeaderLookup {
    /// Snapshot the headers of an inbound request.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .collect()
    }

    /// Look up a header value, ignoring the case of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderLookup
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (name, value) in iter {
            let value: String = value.into();
            match entries.entry(name.as_ref().to_ascii_lowercase()) {
                Entry::Occupied(mut existing) => {
                    let folded: &mut String = existing.get_mut();
                    folded.push(',');
                    folded.push_str(&value);
                }
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
            }
        }
        Self { entries }
    }
}
