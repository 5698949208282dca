//! Data models for the course and grade API
//!
//! Field names follow the API's JSON, which is not consistently cased
//! (`studentID` on students, `studentId` on grades).

mod auth;
mod course;
mod grade;
mod student;

pub use auth::{ErrorBody, LoginRequest, LoginResponse};
pub use course::Course;
pub use grade::Grade;
pub use student::Student;
