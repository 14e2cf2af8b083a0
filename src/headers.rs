use crate::constants::header;
use indexmap::IndexMap;

/// Response headers in insertion order.
pub type Headers = IndexMap<String, String>;

/// Accumulates the CORS header set. A header pushed twice keeps its first
/// position and its latest value.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    pub(crate) fn push(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Adds `field` to `Vary` unless it is already listed (case-insensitive).
    pub(crate) fn add_vary(&mut self, field: &str) {
        match self.headers.get_mut(header::VARY) {
            Some(existing) => {
                if !existing
                    .split(',')
                    .any(|listed| listed.trim().eq_ignore_ascii_case(field))
                {
                    existing.push_str(", ");
                    existing.push_str(field);
                }
            }
            None => {
                self.headers
                    .insert(header::VARY.to_string(), field.to_string());
            }
        }
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        self.headers.extend(other.headers);
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
