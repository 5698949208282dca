//! Authentication models

use serde::{Deserialize, Serialize};

/// Body of the login exchange
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response. Every field may be missing; the session manager decides
/// what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token (JWT)
    #[serde(default)]
    pub token: Option<String>,

    /// Identifier of the authenticated student
    #[serde(default, rename = "studentID", alias = "subjectID", alias = "studentId")]
    pub subject_id: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Error payload returned by the API on failures
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
