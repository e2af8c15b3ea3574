//! Registration and lookup over the user directory.

use std::sync::Arc;

use thiserror::Error;

use keyward_core::{DomainError, Email, UserId};

use crate::model::{NewUser, UserRecord};
use crate::store::{DirectoryError, UserDirectory};

/// What a user operation can fail with, shaped for the HTTP layer: each
/// variant maps to exactly one response status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserServiceError {
    /// Registration input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The email address is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// No record for the requested address.
    #[error("user not found")]
    NotFound,

    /// The directory itself could not answer.
    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),
}

impl UserServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DomainError> for UserServiceError {
    // Only value parsing reaches this service from the domain layer.
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DirectoryError> for UserServiceError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Duplicate => Self::DuplicateEmail,
            DirectoryError::Unavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}

/// User registration and lookup, backed by whatever directory it is handed.
#[derive(Clone)]
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Register a new user.
    ///
    /// Names must be non-empty after trimming and the email must parse;
    /// the address is normalized before storage, so `A@B.com` and `a@b.com`
    /// collide as duplicates.
    pub async fn create_user(&self, input: NewUser) -> Result<UserRecord, UserServiceError> {
        let first_name = input.first_name.trim();
        if first_name.is_empty() {
            return Err(UserServiceError::validation("first name must not be empty"));
        }
        let last_name = input.last_name.trim();
        if last_name.is_empty() {
            return Err(UserServiceError::validation("last name must not be empty"));
        }

        let email = Email::parse(&input.email)?;

        let record = UserRecord {
            id: UserId::new(),
            email,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: input.phone,
            created_at: chrono::Utc::now(),
        };

        self.directory.insert(record.clone()).await?;
        tracing::info!(user_id = %record.id, "user registered");

        Ok(record)
    }

    /// Look up a user by normalized email.
    pub async fn load_user(&self, email: &Email) -> Result<UserRecord, UserServiceError> {
        self.directory
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::NotFound)
    }
}
