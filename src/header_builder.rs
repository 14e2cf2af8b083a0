use crate::constants::header;
use crate::context::RequestContext;
use crate::headers::HeaderCollection;
use crate::options::CorsOptions;
use crate::origin::{OriginAuthorizer, OriginDecision};

pub(crate) struct HeaderBuilder<'a> {
    options: &'a CorsOptions,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(options: &'a CorsOptions) -> Self {
        Self { options }
    }

    /// Headers emitted on every response regardless of the origin outcome.
    pub(crate) fn build_base_headers(&self, request: &RequestContext<'_>) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(5);
        headers.extend(self.build_methods_header());
        headers.extend(self.build_allowed_headers(request));
        headers.extend(self.build_max_age_header());
        headers.add_vary(header::ORIGIN);
        headers
    }

    pub(crate) fn build_origin_headers(
        &self,
        request: &RequestContext<'_>,
    ) -> (HeaderCollection, OriginDecision) {
        let decision = self.options.policy.authorize(request.origin);
        let mut headers = HeaderCollection::with_estimate(1);
        if let (OriginDecision::Mirror, Some(origin)) = (decision, request.origin) {
            headers.push(
                header::ACCESS_CONTROL_ALLOW_ORIGIN.to_string(),
                origin.to_string(),
            );
        }
        (headers, decision)
    }

    pub(crate) fn build_methods_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_METHODS.to_string(),
            self.options.methods.join(","),
        );
        headers
    }

    /// Echoes `Access-Control-Request-Headers` verbatim; never a wildcard.
    pub(crate) fn build_allowed_headers(&self, request: &RequestContext<'_>) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_HEADERS.to_string(),
            request
                .access_control_request_headers
                .unwrap_or_default()
                .to_string(),
        );
        headers
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_MAX_AGE.to_string(),
            self.options.max_age.to_string(),
        );
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
