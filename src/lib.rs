//! gradebook - client-side session and routing core for a course/grade service
//!
//! The library holds everything that does not depend on the terminal:
//! the session lifecycle, the authenticated API gateway, the route table
//! with its navigation guard, and configuration.

pub mod client;
pub mod config;
pub mod error;
pub mod router;
pub mod session;
