//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{LoginRequest, LoginResponse};
use crate::error::Result;

/// Credential exchange with the API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange username and password for a token and identity.
    ///
    /// Failures are reported as [`AuthError`](crate::error::AuthError).
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse>;
}
