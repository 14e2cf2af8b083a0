use crate::constants::upstream::DEFAULT_CONTENT_TYPE;
use crate::upstream::{UpstreamTarget, UpstreamUrlBuilder};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request};

/// Inbound request with its body already buffered.
pub type InboundRequest = Request<Bytes>;

/// Lowercase form of `X-Helius-Cloudflare-Proxy`, as `HeaderName` requires.
const PROXY_MARKER: &str = "x-helius-cloudflare-proxy";

/// The minimal request sent to the upstream for non-upgrade traffic.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub target: UpstreamTarget,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl OutboundRequest {
    pub fn url(&self) -> &str {
        self.target.url()
    }
}

/// Maps an admitted inbound request onto its upstream counterpart.
///
/// Only `Content-Type` and the proxy marker survive; caller identity such as
/// `Origin`, `Authorization` and cookies never reaches the upstream.
pub fn build_outbound(request: &InboundRequest, urls: &UpstreamUrlBuilder) -> OutboundRequest {
    let uri = request.uri();
    let target = urls.build(uri.path(), uri.query());
    let method = normalize_method(request.method());
    let body = outbound_body(&method, request.body());
    let headers = outbound_headers(request.headers());

    OutboundRequest {
        method,
        target,
        headers,
        body,
    }
}

/// Method names are matched case-insensitively, so `get` is forwarded as `GET`.
pub(crate) fn normalize_method(method: &Method) -> Method {
    let name = method.as_str();
    if !name.bytes().any(|byte| byte.is_ascii_lowercase()) {
        return method.clone();
    }
    Method::from_bytes(name.to_ascii_uppercase().as_bytes()).unwrap_or_else(|_| method.clone())
}

/// GET and HEAD never carry a body; an empty body counts as none.
pub(crate) fn outbound_body(method: &Method, body: &Bytes) -> Option<Bytes> {
    if *method == Method::GET || *method == Method::HEAD || body.is_empty() {
        None
    } else {
        Some(body.clone())
    }
}

pub(crate) fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    let content_type = match inbound.get(CONTENT_TYPE) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
    };

    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(
        HeaderName::from_static(PROXY_MARKER),
        HeaderValue::from_static("true"),
    );
    headers
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;
