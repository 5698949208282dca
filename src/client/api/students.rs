//! Student API

use async_trait::async_trait;
use reqwest::Method;

use super::or_absent;
use crate::client::ApiClient;
use crate::client::models::Student;
use crate::error::Result;

#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Fetch one student by ID
    async fn get_student(&self, student_id: &str) -> Option<Student>;

    /// Register a new student; returns the server's confirmation message
    async fn register_student(&self, student: &Student) -> Result<String>;
}

#[async_trait]
impl StudentApi for ApiClient {
    async fn get_student(&self, student_id: &str) -> Option<Student> {
        let result = self.get_json("/Student", &[("studentId", student_id)]).await;
        or_absent(result, "student")
    }

    async fn register_student(&self, student: &Student) -> Result<String> {
        self.send_json(Method::POST, "/Student/PushStudent", student)
            .await
    }
}
