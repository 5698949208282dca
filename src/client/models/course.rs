//! Course models

use serde::{Deserialize, Serialize};

/// Course record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_code: String,

    /// Thai course name
    #[serde(rename = "courseNameTH")]
    pub course_name_th: String,

    /// English course name
    #[serde(rename = "courseNameEN")]
    pub course_name_en: String,

    pub credit: f64,

    pub subject_group: String,
}
