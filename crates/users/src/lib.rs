//! `keyward-users` — the user collaborator behind the API: records, the
//! directory port with its in-memory implementation, and the registration/
//! lookup service.

pub mod model;
pub mod service;
pub mod store;

pub use model::{NewUser, UserRecord};
pub use service::{UserService, UserServiceError};
pub use store::{DirectoryError, InMemoryUserDirectory, UserDirectory};
