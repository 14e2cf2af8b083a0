pub mod config;
pub mod constants;
mod context;
mod cors;
mod error;
mod header_builder;
mod headers;
mod options;
mod origin;
mod proxy;
mod result;
pub mod server;
mod transform;
mod transport;
mod upstream;
mod util;

pub use config::{ConfigError, ProxyConfig};
pub use context::RequestContext;
pub use cors::Cors;
pub use error::{BoxError, ProxyError};
pub use headers::Headers;
pub use options::{CorsOptions, ValidationError};
pub use origin::{
    CorsPolicy, ExactListAuthorizer, OriginAuthorizer, OriginDecision, SuffixDomainAuthorizer,
};
pub use proxy::HeliusProxy;
pub use result::{Admission, CorsDecision};
pub use transform::{InboundRequest, OutboundRequest, build_outbound};
pub use transport::{
    ProxyBody, ReqwestTransport, UpstreamResponse, UpstreamTransport, empty_body, full_body,
};
pub use upstream::{ApiKey, UpstreamHost, UpstreamTarget, UpstreamUrlBuilder};
