use crate::cors::Cors;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::CorsPolicy;
use crate::proxy::HeliusProxy;
use crate::transport::UpstreamTransport;
use crate::upstream::{ApiKey, UpstreamUrlBuilder};
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

pub const API_KEY_VAR: &str = "HELIUS_API_KEY";
pub const ALLOW_ORIGIN_VAR: &str = "CORS_ALLOW_ORIGIN";
pub const APEX_DOMAIN_VAR: &str = "CORS_APEX_DOMAIN";
pub const BIND_ADDR_VAR: &str = "PROXY_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Provider secret, only ever written into upstream URLs
    pub api_key: ApiKey,
    /// Origin policy, exact list or apex domain
    pub policy: CorsPolicy,
    /// Listen address
    pub bind_addr: SocketAddr,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR)
            .map(ApiKey::new)
            .ok_or(ConfigError::MissingRequired(API_KEY_VAR))?;

        let policy = match (read(ALLOW_ORIGIN_VAR), read(APEX_DOMAIN_VAR)) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingPolicy),
            (None, Some(apex)) => CorsPolicy::suffix_domain(apex)?,
            (Some(list), None) => CorsPolicy::exact_list(&list),
            (None, None) => CorsPolicy::default(),
        };

        let bind_addr = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        Ok(Self {
            api_key,
            policy,
            bind_addr,
        })
    }

    /// `true` when no allow-list is configured and every origin is accepted.
    pub fn allows_all_origins(&self) -> bool {
        matches!(&self.policy, CorsPolicy::ExactList(list) if list.is_unconfigured())
    }

    pub fn build_proxy<T: UpstreamTransport>(
        &self,
        transport: T,
    ) -> Result<HeliusProxy<T>, ValidationError> {
        let cors = Cors::new(CorsOptions::with_policy(self.policy.clone()))?;
        let urls = UpstreamUrlBuilder::new(self.api_key.clone());
        Ok(HeliusProxy::new(cors, urls, transport))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingRequired(&'static str),
    #[error("set either CORS_ALLOW_ORIGIN or CORS_APEX_DOMAIN, not both")]
    ConflictingPolicy,
    #[error("invalid bind address '{0}'")]
    InvalidBindAddr(String),
    #[error(transparent)]
    InvalidPolicy(#[from] ValidationError),
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
