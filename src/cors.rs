use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::options::{CorsOptions, ValidationError};
use crate::result::{Admission, CorsDecision};

/// Core CORS policy engine that evaluates requests using [`CorsOptions`].
#[derive(Debug, Clone)]
pub struct Cors {
    options: CorsOptions,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    /// Computes the response header set and the origin verdict.
    pub fn decide(&self, request: &RequestContext<'_>) -> CorsDecision {
        let builder = HeaderBuilder::new(&self.options);
        let mut headers = builder.build_base_headers(request);
        let (origin_headers, origin) = builder.build_origin_headers(request);
        headers.extend(origin_headers);

        CorsDecision {
            headers: headers.into_headers(),
            origin,
        }
    }

    /// Applies the admission gate to a decision: preflights terminate here,
    /// blocked origins are rejected for every method.
    pub fn admit(&self, request: &RequestContext<'_>, decision: CorsDecision) -> Admission {
        let CorsDecision { headers, origin } = decision;
        if origin.is_blocked() {
            return Admission::Rejected { headers };
        }
        if request.is_preflight() {
            Admission::PreflightAccepted { headers }
        } else {
            Admission::Forward { headers }
        }
    }

    pub fn check(&self, request: &RequestContext<'_>) -> Admission {
        let decision = self.decide(request);
        self.admit(request, decision)
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
