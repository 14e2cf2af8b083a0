use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while relaying a request to the upstream.
///
/// Messages never include the upstream URL, which carries the API key.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream request to {host} failed")]
    Upstream {
        host: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read upstream response body")]
    UpstreamBody(#[source] reqwest::Error),
    #[error("failed to read inbound request body")]
    InboundBody(#[source] BoxError),
    #[error("failed to build response")]
    Response(#[from] http::Error),
}
