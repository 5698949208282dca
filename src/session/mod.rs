//! Session state: credential storage, token inspection and the lifecycle
//! manager that ties them together.

pub mod clock;
pub mod manager;
pub mod store;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{CurrentUser, SessionEvent, SessionManager};
pub use store::{CredentialStore, Credentials, FileStore, MemoryStore, StorageKey};
