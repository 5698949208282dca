//! API trait definitions split by resource
//!
//! - [`AuthApi`] - Login exchange
//! - [`StudentApi`] - Student lookup and registration
//! - [`CourseApi`] - Course catalogue CRUD
//! - [`GradeApi`] - Grade lookup and recording
//!
//! Read operations return `None` when the call fails (the error is logged);
//! mutations return the error so the caller can react.

mod auth;
mod courses;
mod grades;
mod students;

pub use auth::AuthApi;
pub use courses::CourseApi;
pub use grades::GradeApi;
pub use students::StudentApi;

use log::warn;

use crate::error::Result;

/// Collapse a failed read into `None`, logging why.
pub(crate) fn or_absent<T>(result: Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Error fetching {}: {}", what, e);
            None
        }
    }
}
