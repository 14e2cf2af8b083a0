use crate::options::ValidationError;
use std::fmt;
use std::sync::Arc;
use url::Url;

const MAX_ORIGIN_LENGTH: usize = 4_096;
const HTTPS_SCHEME: &str = "https";

/// Outcome of checking a request `Origin` against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    /// Echo the request origin back in `Access-Control-Allow-Origin`.
    Mirror,
    /// Origin was sent and fails the policy; the request is blocked.
    Disallow,
    /// Not a cross-origin browser request, or the policy is unconfigured.
    /// The request proceeds without `Access-Control-Allow-Origin`.
    Skip,
}

impl OriginDecision {
    pub fn is_blocked(self) -> bool {
        matches!(self, OriginDecision::Disallow)
    }
}

/// Decides whether a request origin may read cross-origin responses.
pub trait OriginAuthorizer: Send + Sync {
    fn authorize(&self, request_origin: Option<&str>) -> OriginDecision;
}

/// Exact string match against a configured list.
///
/// An empty list allows every caller through without emitting
/// `Access-Control-Allow-Origin`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExactListAuthorizer {
    origins: Vec<String>,
}

impl ExactListAuthorizer {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for origin in origins {
            let trimmed = origin.into().trim().to_string();
            if !trimmed.is_empty() && !deduped.contains(&trimmed) {
                deduped.push(trimmed);
            }
        }
        Self { origins: deduped }
    }

    /// Parses a comma-separated list such as `"https://a.dev, https://b.dev"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn is_unconfigured(&self) -> bool {
        self.origins.is_empty()
    }
}

impl OriginAuthorizer for ExactListAuthorizer {
    fn authorize(&self, request_origin: Option<&str>) -> OriginDecision {
        let Some(origin) = request_origin else {
            return OriginDecision::Skip;
        };
        if self.origins.is_empty() {
            return OriginDecision::Skip;
        }
        if self.origins.iter().any(|allowed| allowed == origin) {
            OriginDecision::Mirror
        } else {
            OriginDecision::Disallow
        }
    }
}

/// Matches an apex domain and every subdomain under it, `https` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixDomainAuthorizer {
    apex: String,
    dotted_apex: String,
}

impl SuffixDomainAuthorizer {
    pub fn new(apex: impl Into<String>) -> Result<Self, ValidationError> {
        let apex = apex.into().trim().trim_end_matches('.').to_ascii_lowercase();
        if apex.is_empty() {
            return Err(ValidationError::EmptyApexDomain);
        }
        if apex.contains(['/', ':', '*', ' ', '?', '#', '@']) || apex.starts_with('.') {
            return Err(ValidationError::InvalidApexDomain(apex));
        }

        let dotted_apex = format!(".{apex}");
        Ok(Self { apex, dotted_apex })
    }

    pub fn apex(&self) -> &str {
        &self.apex
    }

    pub fn matches(&self, origin: &str) -> bool {
        if origin.len() > MAX_ORIGIN_LENGTH {
            return false;
        }
        let Ok(url) = Url::parse(origin) else {
            return false;
        };
        if url.scheme() != HTTPS_SCHEME {
            return false;
        }
        match url.host_str() {
            Some(host) => host == self.apex || host.ends_with(&self.dotted_apex),
            None => false,
        }
    }
}

impl OriginAuthorizer for SuffixDomainAuthorizer {
    fn authorize(&self, request_origin: Option<&str>) -> OriginDecision {
        match request_origin {
            Some(origin) if self.matches(origin) => OriginDecision::Mirror,
            Some(_) => OriginDecision::Disallow,
            None => OriginDecision::Skip,
        }
    }
}

/// Origin policy in force for a deployment.
#[derive(Clone)]
pub enum CorsPolicy {
    ExactList(ExactListAuthorizer),
    SuffixDomain(SuffixDomainAuthorizer),
    Custom(Arc<dyn OriginAuthorizer>),
}

impl Default for CorsPolicy {
    fn default() -> Self {
        CorsPolicy::ExactList(ExactListAuthorizer::default())
    }
}

impl CorsPolicy {
    pub fn exact_list(list: &str) -> Self {
        CorsPolicy::ExactList(ExactListAuthorizer::parse(list))
    }

    pub fn suffix_domain(apex: impl Into<String>) -> Result<Self, ValidationError> {
        SuffixDomainAuthorizer::new(apex).map(CorsPolicy::SuffixDomain)
    }

    pub fn custom<A>(authorizer: A) -> Self
    where
        A: OriginAuthorizer + 'static,
    {
        CorsPolicy::Custom(Arc::new(authorizer))
    }
}

impl OriginAuthorizer for CorsPolicy {
    fn authorize(&self, request_origin: Option<&str>) -> OriginDecision {
        match self {
            CorsPolicy::ExactList(authorizer) => authorizer.authorize(request_origin),
            CorsPolicy::SuffixDomain(authorizer) => authorizer.authorize(request_origin),
            CorsPolicy::Custom(authorizer) => authorizer.authorize(request_origin),
        }
    }
}

impl fmt::Debug for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsPolicy::ExactList(list) => f.debug_tuple("ExactList").field(list).finish(),
            CorsPolicy::SuffixDomain(suffix) => {
                f.debug_tuple("SuffixDomain").field(suffix).finish()
            }
            CorsPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
