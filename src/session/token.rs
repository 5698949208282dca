//! Bearer token inspection
//!
//! Tokens are JWTs (`header.payload.signature`). Only the `exp` claim of the
//! payload is read; the signature is not verified. Anything that cannot be
//! decoded counts as expired.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Why a token payload could not be read. Never leaves this module as an
/// error; callers only ever see "expired".
#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("expected 3 segments, found {0}")]
    Segments(usize),

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    #[error("invalid claim payload: {0}")]
    Payload(String),
}

#[derive(Debug, Deserialize)]
struct Claims {
    /// Seconds since the epoch. JWT allows fractional values.
    exp: f64,
}

/// Decode base64url (URL-safe base64, padding optional)
fn base64_decode_url(input: &str) -> Result<Vec<u8>, DecodeError> {
    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");
    let standard_b64 = standard_b64.trim_end_matches('=');

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err(DecodeError::Base64("invalid length".to_string())),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| DecodeError::Base64(e.to_string()))
}

fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(DecodeError::Segments(parts.len()));
    }

    let payload = base64_decode_url(parts[1])?;
    serde_json::from_slice(&payload).map_err(|e| DecodeError::Payload(e.to_string()))
}

/// Whether `token` is expired at `now`.
///
/// Expired iff `exp * 1000 < now` in milliseconds, so a token is still
/// valid during the exact millisecond of its expiry.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp * 1000.0 < now.timestamp_millis() as f64,
        Err(e) => {
            log::debug!("Treating undecodable token as expired: {}", e);
            true
        }
    }
}

/// Whether `token` is expired right now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// The instant carried in the `exp` claim, if the token can be decoded.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let claims = decode_claims(token).ok()?;
    DateTime::from_timestamp_millis((claims.exp * 1000.0) as i64)
}
