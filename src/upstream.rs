//! Upstream selection and the one place the API key is written into a URL.

use crate::constants::upstream::{API_HOST, API_KEY_PARAM, MAINNET_HOST};
use std::borrow::Cow;
use std::fmt;

/// One of the two fixed Helius hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamHost {
    Mainnet,
    Api,
}

impl UpstreamHost {
    /// The root path serves JSON-RPC; any other path goes to the REST surface.
    pub fn for_path(path: &str) -> Self {
        if path == "/" {
            UpstreamHost::Mainnet
        } else {
            UpstreamHost::Api
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamHost::Mainnet => MAINNET_HOST,
            UpstreamHost::Api => API_HOST,
        }
    }
}

impl fmt::Display for UpstreamHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// A resolved destination. The URL embeds the API key, so `Debug` only shows
/// the host.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    host: UpstreamHost,
    url: String,
}

impl UpstreamTarget {
    pub fn host(&self) -> UpstreamHost {
        self.host
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamTarget")
            .field("host", &self.host)
            .field("url", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamUrlBuilder {
    api_key: ApiKey,
    mainnet_base: String,
    api_base: String,
}

impl UpstreamUrlBuilder {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            mainnet_base: format!("https://{MAINNET_HOST}"),
            api_base: format!("https://{API_HOST}"),
        }
    }

    /// Points both hosts at other scheme-and-authority bases, such as a local
    /// stand-in. Routing and key placement are unchanged.
    pub fn with_bases(mut self, mainnet: impl Into<String>, api: impl Into<String>) -> Self {
        self.mainnet_base = mainnet.into().trim_end_matches('/').to_string();
        self.api_base = api.into().trim_end_matches('/').to_string();
        self
    }

    /// `https://{host}{path}?api-key={KEY}` followed by `&{query}` when the
    /// inbound query is non-empty. The key always comes first.
    ///
    /// Dot segments are resolved before routing, so `/.` and `/v0/..` reach
    /// the mainnet host exactly as the URL that is finally sent would.
    pub fn build(&self, path: &str, query: Option<&str>) -> UpstreamTarget {
        let path = remove_dot_segments(path);
        let path = if path.is_empty() { "/" } else { &*path };
        let host = UpstreamHost::for_path(path);
        let mut url = self.base_url(host, path);

        if let Some(query) = query.map(|q| q.strip_prefix('?').unwrap_or(q))
            && !query.is_empty()
        {
            url.push('&');
            url.push_str(query);
        }

        UpstreamTarget { host, url }
    }

    /// Fixed destination for WebSocket upgrades, independent of the inbound path.
    pub fn websocket(&self) -> UpstreamTarget {
        let host = UpstreamHost::Mainnet;
        UpstreamTarget {
            host,
            url: self.base_url(host, "/"),
        }
    }

    fn base_url(&self, host: UpstreamHost, path: &str) -> String {
        let base = match host {
            UpstreamHost::Mainnet => &self.mainnet_base,
            UpstreamHost::Api => &self.api_base,
        };
        format!("{base}{path}?{API_KEY_PARAM}={}", self.api_key.expose())
    }
}

fn is_single_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        ".." | ".%2e" | "%2e." | "%2e%2e"
    )
}

/// Resolves `.` and `..` segments (plain or percent-encoded) the way URL
/// parsing does. A trailing dot segment leaves a trailing slash.
pub(crate) fn remove_dot_segments(path: &str) -> Cow<'_, str> {
    let Some(rest) = path.strip_prefix('/') else {
        return Cow::Borrowed(path);
    };
    if !rest
        .split('/')
        .any(|segment| is_single_dot(segment) || is_double_dot(segment))
    {
        return Cow::Borrowed(path);
    }

    let segments: Vec<&str> = rest.split('/').collect();
    let last = segments.len() - 1;
    let mut output: Vec<&str> = Vec::with_capacity(segments.len());
    for (index, segment) in segments.into_iter().enumerate() {
        if is_double_dot(segment) {
            output.pop();
        } else if !is_single_dot(segment) {
            output.push(segment);
            continue;
        }
        if index == last {
            output.push("");
        }
    }

    Cow::Owned(format!("/{}", output.join("/")))
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod upstream_test;
