use helius_cors_proxy::{
    InboundRequest, OutboundRequest, ProxyError, UpstreamResponse, UpstreamTarget,
    UpstreamTransport, full_body,
};
use http::{Response, StatusCode};
use std::sync::Mutex;

pub const UPSTREAM_BODY: &str = r#"{"jsonrpc":"2.0","result":"ok","id":1}"#;

#[derive(Debug)]
pub enum Recorded {
    Send(OutboundRequest),
    Passthrough {
        target: UpstreamTarget,
        request: InboundRequest,
    },
}

/// Records every upstream call and answers with a canned response.
pub struct RecordingTransport {
    calls: Mutex<Vec<Recorded>>,
    status: StatusCode,
    fail: bool,
}

impl RecordingTransport {
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub fn with_status(status: StatusCode) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        self.calls.lock().expect("recording mutex poisoned")
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn take_sent(&self) -> Vec<OutboundRequest> {
        self.calls()
            .drain(..)
            .filter_map(|call| match call {
                Recorded::Send(request) => Some(request),
                Recorded::Passthrough { .. } => None,
            })
            .collect()
    }

    fn respond(&self) -> Result<UpstreamResponse, ProxyError> {
        if self.fail {
            let source = reqwest::Client::new()
                .get("not a url")
                .build()
                .expect_err("relative URL cannot be built");
            return Err(ProxyError::Upstream {
                host: "api.helius.xyz",
                source,
            });
        }

        Ok(Response::builder()
            .status(self.status)
            .header("content-type", "application/json")
            .header("cache-control", "no-store")
            .header("x-upstream", "helius")
            .body(full_body(UPSTREAM_BODY))
            .expect("valid canned response"))
    }
}

impl UpstreamTransport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, ProxyError> {
        self.calls().push(Recorded::Send(request));
        self.respond()
    }

    async fn passthrough(
        &self,
        target: UpstreamTarget,
        request: InboundRequest,
    ) -> Result<UpstreamResponse, ProxyError> {
        self.calls().push(Recorded::Passthrough { target, request });
        self.respond()
    }
}
