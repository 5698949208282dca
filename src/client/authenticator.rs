//! Login exchange over HTTP

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client as HttpClient;

use super::ClientOptions;
use super::api::AuthApi;
use super::models::{ErrorBody, LoginRequest, LoginResponse};
use crate::error::{AuthError, Result};

/// Posts credentials to `{base}/auth/login`.
pub struct HttpAuthenticator {
    http: HttpClient,
    base_url: String,
}

impl HttpAuthenticator {
    pub fn new(options: &ClientOptions) -> Result<Self> {
        Ok(Self {
            http: options.build_http()?,
            base_url: options.base_url.clone(),
        })
    }
}

#[async_trait]
impl AuthApi for HttpAuthenticator {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Login request failed: {}", e);
                AuthError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Login rejected with status {}", status);
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(AuthError::rejected(message).into());
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse login response: {}", e);
            AuthError::MissingToken.into()
        })
    }
}
