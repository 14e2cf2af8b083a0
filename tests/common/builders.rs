use bytes::Bytes;
use helius_cors_proxy::constants::method;
use helius_cors_proxy::{
    ApiKey, Cors, CorsOptions, CorsPolicy, HeliusProxy, InboundRequest, RequestContext,
    UpstreamUrlBuilder,
};
use http::Request;

use super::transport::RecordingTransport;

pub const API_KEY: &str = "TEST_KEY";

#[derive(Default)]
pub struct CorsBuilder {
    policy: Option<CorsPolicy>,
    max_age: Option<u64>,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_list(mut self, list: &str) -> Self {
        self.policy = Some(CorsPolicy::exact_list(list));
        self
    }

    pub fn apex(mut self, apex: &str) -> Self {
        self.policy = Some(CorsPolicy::suffix_domain(apex).expect("valid apex domain"));
        self
    }

    pub fn max_age(mut self, value: u64) -> Self {
        self.max_age = Some(value);
        self
    }

    pub fn build(self) -> Cors {
        let defaults = CorsOptions::default();
        Cors::new(CorsOptions {
            policy: self.policy.unwrap_or(defaults.policy),
            max_age: self.max_age.unwrap_or(defaults.max_age),
            methods: defaults.methods,
        })
        .expect("valid CORS configuration")
    }

    pub fn proxy(self) -> HeliusProxy<RecordingTransport> {
        self.proxy_with(RecordingTransport::ok())
    }

    pub fn proxy_with(self, transport: RecordingTransport) -> HeliusProxy<RecordingTransport> {
        HeliusProxy::new(
            self.build(),
            UpstreamUrlBuilder::new(ApiKey::new(API_KEY)),
            transport,
        )
    }
}

pub struct RequestBuilder {
    method: String,
    uri: String,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl RequestBuilder {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            uri: "/".to_string(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn origin(self, origin: impl Into<String>) -> Self {
        self.header("Origin", origin)
    }

    pub fn request_headers(self, value: impl Into<String>) -> Self {
        self.header("Access-Control-Request-Headers", value)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> InboundRequest {
        let mut builder = Request::builder()
            .method(self.method.as_str())
            .uri(self.uri.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(self.body).expect("valid inbound request")
    }
}

pub struct ContextBuilder {
    method: &'static str,
    origin: Option<String>,
    request_headers: Option<String>,
}

impl ContextBuilder {
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_headers(mut self, value: impl Into<String>) -> Self {
        self.request_headers = Some(value.into());
        self
    }

    pub fn decide(&self, cors: &Cors) -> helius_cors_proxy::CorsDecision {
        cors.decide(&self.context())
    }

    pub fn check(&self, cors: &Cors) -> helius_cors_proxy::Admission {
        cors.check(&self.context())
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            method: self.method,
            origin: self.origin.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
        }
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn request(method: &str) -> RequestBuilder {
    RequestBuilder::new(method)
}

pub fn simple_request() -> ContextBuilder {
    ContextBuilder {
        method: method::GET,
        origin: None,
        request_headers: None,
    }
}

pub fn preflight_request() -> ContextBuilder {
    ContextBuilder {
        method: method::OPTIONS,
        origin: None,
        request_headers: None,
    }
}
