use crate::constants::{DEFAULT_MAX_AGE, method};
use crate::origin::CorsPolicy;
use crate::util::is_http_token;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CorsOptions {
    pub policy: CorsPolicy,
    pub methods: Vec<String>,
    pub max_age: u64,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            policy: CorsPolicy::default(),
            methods: vec![
                method::GET.into(),
                method::HEAD.into(),
                method::POST.into(),
                method::PUT.into(),
                method::OPTIONS.into(),
            ],
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl CorsOptions {
    pub fn with_policy(policy: CorsPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.methods.is_empty() {
            return Err(ValidationError::EmptyMethods);
        }
        if let Some(invalid) = self
            .methods
            .iter()
            .find(|value| !is_http_token(value))
        {
            return Err(ValidationError::InvalidMethod(invalid.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one allowed method must be configured")]
    EmptyMethods,
    #[error("allowed method '{0}' is not a single HTTP method token")]
    InvalidMethod(String),
    #[error("apex domain must not be empty")]
    EmptyApexDomain,
    #[error("apex domain '{0}' must be a bare host name without scheme, port, path or wildcard")]
    InvalidApexDomain(String),
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
