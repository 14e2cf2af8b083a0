use http::HeaderMap;
use http::header::{ACCESS_CONTROL_REQUEST_HEADERS, ORIGIN};

/// The slice of an inbound request that the CORS engine looks at.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn from_headers(method: &'a str, headers: &'a HeaderMap) -> Self {
        Self {
            method,
            origin: origin_str(headers),
            access_control_request_headers: headers
                .get(ACCESS_CONTROL_REQUEST_HEADERS)
                .and_then(|value| value.to_str().ok()),
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.method
            .eq_ignore_ascii_case(crate::constants::method::OPTIONS)
    }
}

/// An empty `Origin` counts as absent. A present but non-visible-ASCII value is
/// kept as an empty string so it can never match and still triggers a block.
fn origin_str(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(ORIGIN)?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_str().unwrap_or(""))
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
