use crate::constants::response::{BAD_GATEWAY_BODY, BAD_REQUEST_BODY};
use crate::error::{BoxError, ProxyError};
use crate::proxy::HeliusProxy;
use crate::transport::{ProxyBody, UpstreamTransport, full_body};
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accepts connections until `shutdown` resolves. Each connection is served on
/// its own task with upgrades enabled so WebSocket sessions can be relayed.
pub async fn serve<T, S>(
    listener: TcpListener,
    proxy: Arc<HeliusProxy<T>>,
    shutdown: S,
) -> io::Result<()>
where
    T: UpstreamTransport + 'static,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(connection) => connection,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to accept connection");
                        continue;
                    }
                };

                let proxy = Arc::clone(&proxy);
                tokio::spawn(async move {
                    let service = service_fn(move |request| {
                        let proxy = Arc::clone(&proxy);
                        async move { Ok::<_, Infallible>(dispatch(&proxy, request).await) }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .with_upgrades()
                        .await
                    {
                        tracing::debug!(%peer, error = %err, "connection closed with error");
                    }
                });
            }
            () = &mut shutdown => {
                tracing::info!("shutdown signal received, no longer accepting connections");
                return Ok(());
            }
        }
    }
}

/// Buffers the inbound body, runs the proxy and turns failures into plain
/// status responses. Error details stay in the logs.
pub async fn dispatch<T, B>(proxy: &HeliusProxy<T>, request: Request<B>) -> Response<ProxyBody>
where
    T: UpstreamTransport,
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let (parts, body) = request.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            let err = ProxyError::InboundBody(err.into());
            tracing::warn!(error = %err, "dropping request");
            return plain_response(StatusCode::BAD_REQUEST, BAD_REQUEST_BODY);
        }
    };

    match proxy.handle(Request::from_parts(parts, body)).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, source = ?std::error::Error::source(&err), "proxy error");
            plain_response(StatusCode::BAD_GATEWAY, BAD_GATEWAY_BODY)
        }
    }
}

fn plain_response(status: StatusCode, body: &'static str) -> Response<ProxyBody> {
    let mut response = Response::new(full_body(body));
    *response.status_mut() = status;
    response
}
