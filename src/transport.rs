use crate::error::ProxyError;
use crate::transform::{InboundRequest, OutboundRequest};
use crate::upstream::UpstreamTarget;
use bytes::Bytes;
use futures::TryStreamExt;
use http::header::{CONTENT_LENGTH, HOST};
use http::{Response, StatusCode};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::Frame;
use hyper::upgrade::OnUpgrade;
use hyper_util::rt::TokioIo;
use std::future::Future;

pub type ProxyBody = UnsyncBoxBody<Bytes, ProxyError>;
pub type UpstreamResponse = Response<ProxyBody>;

/// The single network call a request makes.
pub trait UpstreamTransport: Send + Sync {
    /// Sends a rewritten request and returns the upstream response as-is.
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, ProxyError>> + Send;

    /// Forwards the caller's request untouched (every header preserved) for
    /// protocol upgrades.
    fn passthrough(
        &self,
        target: UpstreamTarget,
        request: InboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, ProxyError>> + Send;
}

pub fn full_body(bytes: impl Into<Bytes>) -> ProxyBody {
    Full::new(bytes.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

pub fn empty_body() -> ProxyBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    upgrade_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_builder(|builder| builder)
    }

    /// Applies `configure` to both underlying clients, e.g. to set timeouts
    /// or disable system proxies.
    pub fn with_builder<F>(configure: F) -> Result<Self, reqwest::Error>
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder,
    {
        Ok(Self {
            client: configure(reqwest::Client::builder()).build()?,
            // Upgrades only exist on HTTP/1.1.
            upgrade_client: configure(reqwest::Client::builder()).http1_only().build()?,
        })
    }
}

impl UpstreamTransport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, ProxyError> {
        let host = request.target.host().as_str();
        let mut builder = self
            .client
            .request(request.method, request.target.url())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ProxyError::Upstream {
                host,
                source: source.without_url(),
            })?;
        streamed_response(response)
    }

    async fn passthrough(
        &self,
        target: UpstreamTarget,
        mut request: InboundRequest,
    ) -> Result<UpstreamResponse, ProxyError> {
        let host = target.host().as_str();
        let client_upgrade = hyper::upgrade::on(&mut request);
        let (parts, body) = request.into_parts();

        // Host and length describe the inbound hop and are recomputed for the new one.
        let mut headers = parts.headers;
        headers.remove(HOST);
        headers.remove(CONTENT_LENGTH);

        let mut builder = self
            .upgrade_client
            .request(parts.method, target.url())
            .headers(headers);
        if !body.is_empty() {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ProxyError::Upstream {
                host,
                source: source.without_url(),
            })?;

        if response.status() != StatusCode::SWITCHING_PROTOCOLS {
            return streamed_response(response);
        }

        let mut switching = Response::builder().status(response.status());
        if let Some(map) = switching.headers_mut() {
            *map = response.headers().clone();
        }
        let switching = switching.body(empty_body())?;

        tokio::spawn(bridge_upgrade(client_upgrade, response));
        Ok(switching)
    }
}

fn streamed_response(response: reqwest::Response) -> Result<UpstreamResponse, ProxyError> {
    let mut builder = Response::builder().status(response.status());
    if let Some(map) = builder.headers_mut() {
        *map = response.headers().clone();
    }

    let stream = response
        .bytes_stream()
        .map_ok(Frame::data)
        .map_err(|err| ProxyError::UpstreamBody(err.without_url()));
    Ok(builder.body(StreamBody::new(stream).boxed_unsync())?)
}

/// Joins the caller's upgraded connection with the upstream's once both sides
/// have switched protocols.
async fn bridge_upgrade(client: OnUpgrade, upstream: reqwest::Response) {
    let client = match client.await {
        Ok(upgraded) => upgraded,
        Err(err) => {
            tracing::warn!(error = %err, "caller connection did not upgrade");
            return;
        }
    };
    let mut upstream = match upstream.upgrade().await {
        Ok(upgraded) => upgraded,
        Err(err) => {
            tracing::warn!(error = %err.without_url(), "upstream connection did not upgrade");
            return;
        }
    };

    let mut client = TokioIo::new(client);
    match tokio::io::copy_bidirectional(&mut client, &mut upstream).await {
        Ok((to_upstream, to_client)) => {
            tracing::debug!(to_upstream, to_client, "websocket relay closed");
        }
        Err(err) => {
            tracing::debug!(error = %err, "websocket relay ended");
        }
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
