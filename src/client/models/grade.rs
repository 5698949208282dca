//! Grade models

use serde::{Deserialize, Serialize};

/// Grade of one student in one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub student_id: String,

    pub course_code: String,

    pub grade: String,

    pub semester: String,

    pub academic_year: String,
}
