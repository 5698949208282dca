//! Course API

use async_trait::async_trait;
use reqwest::Method;

use super::or_absent;
use crate::client::ApiClient;
use crate::client::models::Course;
use crate::error::Result;

#[async_trait]
pub trait CourseApi: Send + Sync {
    /// Fetch one course by code
    async fn get_course(&self, course_code: &str) -> Option<Course>;

    /// List every course
    async fn list_courses(&self) -> Option<Vec<Course>>;

    async fn push_course(&self, course: &Course) -> Result<()>;

    async fn update_course(&self, course: &Course) -> Result<()>;

    async fn delete_course(&self, course_code: &str) -> Result<()>;
}

#[async_trait]
impl CourseApi for ApiClient {
    async fn get_course(&self, course_code: &str) -> Option<Course> {
        let result = self.get_json("/Course", &[("courseCode", course_code)]).await;
        or_absent(result, "course")
    }

    async fn list_courses(&self) -> Option<Vec<Course>> {
        let result = self.get_json("/Course/GetCoursesList", &[]).await;
        or_absent(result, "courses list")
    }

    async fn push_course(&self, course: &Course) -> Result<()> {
        self.send_json(Method::POST, "/Course/PushCourse", course)
            .await?;
        Ok(())
    }

    async fn update_course(&self, course: &Course) -> Result<()> {
        self.send_json(Method::PUT, "/Course/UpdateCourse", course)
            .await?;
        Ok(())
    }

    async fn delete_course(&self, course_code: &str) -> Result<()> {
        self.delete("/Course/DeleteCourse", &[("courseCode", course_code)])
            .await?;
        Ok(())
    }
}
