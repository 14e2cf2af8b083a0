use crate::constants::response::FORBIDDEN_BODY;
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::error::ProxyError;
use crate::headers::Headers;
use crate::result::Admission;
use crate::transform::{InboundRequest, build_outbound};
use crate::transport::{ProxyBody, UpstreamResponse, UpstreamTransport, empty_body, full_body};
use crate::upstream::UpstreamUrlBuilder;
use crate::util::is_websocket_upgrade;
use http::header::{HeaderMap, HeaderName, HeaderValue, UPGRADE};
use http::{Response, StatusCode};

/// Per-request handler: CORS gate, then WebSocket passthrough or rewrite and
/// forward. Holds no mutable state, so one instance serves every connection.
#[derive(Debug)]
pub struct HeliusProxy<T> {
    cors: Cors,
    urls: UpstreamUrlBuilder,
    transport: T,
}

impl<T: UpstreamTransport> HeliusProxy<T> {
    pub fn new(cors: Cors, urls: UpstreamUrlBuilder, transport: T) -> Self {
        Self {
            cors,
            urls,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn handle(&self, request: InboundRequest) -> Result<Response<ProxyBody>, ProxyError> {
        let context = RequestContext::from_headers(request.method().as_str(), request.headers());
        let headers = match self.cors.check(&context) {
            Admission::Rejected { headers } => {
                tracing::debug!(
                    method = %request.method(),
                    origin = context.origin.unwrap_or_default(),
                    "rejected cross-origin request"
                );
                return cors_response(StatusCode::FORBIDDEN, full_body(FORBIDDEN_BODY), &headers);
            }
            Admission::PreflightAccepted { headers } => {
                return cors_response(StatusCode::NO_CONTENT, empty_body(), &headers);
            }
            Admission::Forward { headers } => headers,
        };

        if is_upgrade_request(request.headers()) {
            let target = self.urls.websocket();
            tracing::debug!(upstream = %target.host(), "passing websocket upgrade through");
            return self.transport.passthrough(target, request).await;
        }

        let method = request.method().clone();
        let path = request.uri().path().to_owned();
        let outbound = build_outbound(&request, &self.urls);
        let host = outbound.target.host();

        let upstream = self.transport.send(outbound).await?;
        tracing::info!(
            method = %method,
            path = %path,
            upstream = %host,
            status = upstream.status().as_u16(),
            "proxied request"
        );
        with_cors_headers(upstream, &headers)
    }
}

fn is_upgrade_request(headers: &HeaderMap) -> bool {
    headers
        .get(UPGRADE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_websocket_upgrade)
}

fn cors_response(
    status: StatusCode,
    body: ProxyBody,
    headers: &Headers,
) -> Result<Response<ProxyBody>, ProxyError> {
    let mut response = Response::builder().status(status).body(body)?;
    apply_headers(response.headers_mut(), headers);
    Ok(response)
}

/// Keeps the upstream status and body; its headers are replaced wholesale.
fn with_cors_headers(
    upstream: UpstreamResponse,
    headers: &Headers,
) -> Result<Response<ProxyBody>, ProxyError> {
    let (parts, body) = upstream.into_parts();
    cors_response(parts.status, body, headers)
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        if let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            map.insert(header_name, header_value);
        }
    }
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;
