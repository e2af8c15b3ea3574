//! User directory port and its in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use keyward_core::Email;

use crate::model::UserRecord;

/// Failure of the store itself, as opposed to anything about the data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Uniqueness violation on insert: the email is already registered.
    #[error("duplicate email")]
    Duplicate,

    /// The directory could not be reached or is in a broken state.
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Keyed lookup over user records.
///
/// `email_exists` is the ownership-predicate source for the authorization
/// pipeline. Implementations may sit in front of a real datastore, so every
/// operation is async and fallible.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Store a record under its (already normalized) email. Fails with
    /// `Duplicate` when the address is taken.
    async fn insert(&self, record: UserRecord) -> Result<(), DirectoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, DirectoryError>;

    /// Whether a record exists for this address.
    async fn email_exists(&self, email: &Email) -> Result<bool, DirectoryError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

#[async_trait]
impl<S> UserDirectory for Arc<S>
where
    S: UserDirectory + ?Sized,
{
    async fn insert(&self, record: UserRecord) -> Result<(), DirectoryError> {
        (**self).insert(record).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, DirectoryError> {
        (**self).find_by_email(email).await
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, DirectoryError> {
        (**self).email_exists(email).await
    }
}

/// In-memory directory; the only implementation while persistence stays out
/// of scope. Uniqueness is enforced under the write lock, so concurrent
/// registrations of the same address cannot both win.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<HashMap<Email, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn insert(&self, record: UserRecord) -> Result<(), DirectoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DirectoryError::unavailable("user store lock poisoned"))?;

        if map.contains_key(&record.email) {
            return Err(DirectoryError::Duplicate);
        }
        map.insert(record.email.clone(), record);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, DirectoryError> {
        let map = self
            .inner
            .read()
            .map_err(|_| DirectoryError::unavailable("user store lock poisoned"))?;
        Ok(map.get(email).cloned())
    }
}
