use crate::constants::header;
use crate::headers::Headers;
use crate::origin::OriginDecision;

/// Headers computed for a request plus the verdict on its origin.
#[derive(Debug, Clone)]
pub struct CorsDecision {
    pub headers: Headers,
    pub origin: OriginDecision,
}

impl CorsDecision {
    /// `false` only when an `Origin` was sent and failed the policy.
    pub fn is_allowed(&self) -> bool {
        !self.origin.is_blocked()
    }

    pub fn allow_origin(&self) -> Option<&str> {
        self.headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(String::as_str)
    }
}

/// What to do with a request once its CORS decision is known.
#[derive(Debug, Clone)]
pub enum Admission {
    /// Answer an allowed preflight with `204 No Content`.
    PreflightAccepted { headers: Headers },
    /// Answer with `403 Forbidden (CORS)`.
    Rejected { headers: Headers },
    /// Proceed to the upstream and decorate its response with `headers`.
    Forward { headers: Headers },
}

impl Admission {
    /// Status of the locally produced response, `None` when forwarding.
    pub fn status(&self) -> Option<u16> {
        match self {
            Admission::PreflightAccepted { .. } => Some(204),
            Admission::Rejected { .. } => Some(403),
            Admission::Forward { .. } => None,
        }
    }

    pub fn headers(&self) -> &Headers {
        match self {
            Admission::PreflightAccepted { headers }
            | Admission::Rejected { headers }
            | Admission::Forward { headers } => headers,
        }
    }

    pub fn into_headers(self) -> Headers {
        match self {
            Admission::PreflightAccepted { headers }
            | Admission::Rejected { headers }
            | Admission::Forward { headers } => headers,
        }
    }
}
