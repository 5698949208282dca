//! Grade API
//!
//! The API has no grade deletion.

use async_trait::async_trait;
use reqwest::Method;

use super::or_absent;
use crate::client::ApiClient;
use crate::client::models::Grade;
use crate::error::Result;

#[async_trait]
pub trait GradeApi: Send + Sync {
    /// List every recorded grade
    async fn list_grades(&self) -> Option<Vec<Grade>>;

    /// Grade of one student in one course
    async fn get_grade(&self, student_id: &str, course_code: &str) -> Option<Grade>;

    /// Record a grade; returns the server's confirmation message
    async fn push_grade(&self, grade: &Grade) -> Result<String>;

    /// Change a recorded grade; returns the server's confirmation message
    async fn update_grade(&self, grade: &Grade) -> Result<String>;
}

#[async_trait]
impl GradeApi for ApiClient {
    async fn list_grades(&self) -> Option<Vec<Grade>> {
        let result = self.get_json("/Grade/GetGradeList", &[]).await;
        or_absent(result, "grade list")
    }

    async fn get_grade(&self, student_id: &str, course_code: &str) -> Option<Grade> {
        let result = self
            .get_json(
                "/Grade",
                &[("studentId", student_id), ("courseCode", course_code)],
            )
            .await;
        or_absent(result, "grade")
    }

    async fn push_grade(&self, grade: &Grade) -> Result<String> {
        self.send_json(Method::POST, "/Grade/PushGrade", grade).await
    }

    async fn update_grade(&self, grade: &Grade) -> Result<String> {
        self.send_json(Method::PUT, "/Grade/UpdateGrade", grade).await
    }
}
