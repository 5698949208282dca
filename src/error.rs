//! Error types for gradebook

use thiserror::Error;

/// Result type alias for gradebook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when a login fails and the server gave no reason.
pub const DEFAULT_LOGIN_ERROR: &str = "Unable to connect to the server. Please try again.";

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not fetch {0}. Re-run with --debug for details.")]
    Unavailable(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Login failures. The display text is meant for the end user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server refused the credentials and said why (or we fell back).
    #[error("{0}")]
    Rejected(String),

    /// The exchange succeeded but carried no usable token.
    #[error("{}", DEFAULT_LOGIN_ERROR)]
    MissingToken,

    /// Transport failure; the detail is kept for logs only.
    #[error("{}", DEFAULT_LOGIN_ERROR)]
    Network(String),
}

impl AuthError {
    /// Build a rejection from an optional server message.
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.trim().is_empty() => AuthError::Rejected(msg),
            _ => AuthError::Rejected(DEFAULT_LOGIN_ERROR.to_string()),
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session is no longer valid. Run `gradebook login` to sign in again.")]
    Unauthorized,

    #[error("Session token expired. Run `gradebook login` to sign in again.")]
    TokenExpired,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read session file: {0}")]
    Read(String),

    #[error("Failed to write session file: {0}")]
    Write(String),

    #[error("Session file is corrupt: {0}")]
    Parse(String),

    #[error("Credential store lock was poisoned")]
    Poisoned,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Navigation errors
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("No route named '{0}'")]
    UnknownRoute(String),

    #[error("Too many redirects while navigating to '{0}'")]
    RedirectLoop(String),
}
