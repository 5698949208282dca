//! Student models

use serde::{Deserialize, Serialize};

/// Student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "studentID")]
    pub student_id: String,

    pub first_name: String,

    pub last_name: String,

    pub section: String,

    pub username: String,

    /// Only sent when registering; the API may echo it back
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}
