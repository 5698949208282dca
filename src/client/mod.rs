//! Course and grade API client
//!
//! [`ApiClient`] is the single outbound gateway for resource calls: it asks
//! the session for a token before each request and tears the session down
//! on 401. Logging in goes through [`HttpAuthenticator`], which talks to the
//! auth endpoint without a bearer token.

use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::error::{ApiError, Result};

pub mod api;
pub mod authenticator;
pub mod gateway;
pub mod models;

pub use api::{AuthApi, CourseApi, GradeApi, StudentApi};
pub use authenticator::HttpAuthenticator;
pub use gateway::ApiClient;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://localhost:7138/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by the gateway and the authenticator
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL without trailing slash, e.g. `https://localhost:7138/api`
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Accept self-signed certificates (local development servers)
    pub accept_invalid_certs: bool,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub(crate) fn build_http(&self) -> Result<HttpClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(http)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_trim_trailing_slash() {
        let opts = ClientOptions::new("http://localhost:5000/api/");
        assert_eq!(opts.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_default_options() {
        let opts = ClientOptions::default();
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert!(!opts.accept_invalid_certs);
        assert!(opts.build_http().is_ok());
    }
}
