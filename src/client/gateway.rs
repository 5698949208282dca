//! Outbound request gateway

use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ClientOptions;
use super::models::ErrorBody;
use crate::error::{ApiError, Result};
use crate::session::SessionManager;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Gateway for every resource call.
///
/// Per request: the session checks the stored token (an expired one aborts
/// the call), a valid token is attached as `Authorization: Bearer`, then the
/// request is sent. A 401 tears down the session the request was sent under,
/// if it is still current, and the call still fails.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(options: &ClientOptions, session: Arc<SessionManager>) -> Result<Self> {
        Ok(Self {
            http: options.build_http()?,
            base_url: options.base_url.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET and decode a JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.dispatch(Method::GET, path, query, None).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::NotFound(path.to_string()).into());
        }

        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Send a JSON body and return the server's confirmation message
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<String> {
        let body = serde_json::to_value(body)?;
        let response = self.dispatch(method, path, &[], Some(body)).await?;
        Ok(read_message(response).await)
    }

    /// DELETE with query parameters
    pub(crate) async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let response = self.dispatch(Method::DELETE, path, query, None).await?;
        Ok(read_message(response).await)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        // Expiry check must happen before anything is attached or sent
        let token = self.session.authorize_request()?;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} returned 401", path);
            // Only the session this request was sent under may be ended
            if let Some(ref token) = token {
                self.session.expire_token(token);
            }
            return Err(ApiError::Unauthorized.into());
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body).into())
    }
}

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

/// Prefer the API's `message` field, then the raw body, then `fallback`.
fn error_message(body: &str, fallback: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
    {
        return message;
    }
    if body.trim().is_empty() {
        fallback.to_string()
    } else {
        truncate_body(body)
    }
}

fn error_for_status(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(error_message(body, "Resource not found")),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(error_message(body, "Bad request"))
        }
        status if status.is_server_error() => {
            ApiError::ServerError(error_message(body, &format!("Server error: {}", status)))
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

/// Confirmation text from a mutation response.
///
/// The API answers with a JSON string, a JSON object with `message`, or
/// plain text depending on the endpoint.
async fn read_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    parse_message(&text)
}

fn parse_message(text: &str) -> String {
    if let Ok(message) = serde_json::from_str::<String>(text) {
        return message;
    }
    if let Some(message) = serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|b| b.message)
    {
        return message;
    }
    text.trim().to_string()
}
