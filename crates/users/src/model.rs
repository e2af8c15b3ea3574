//! User records and registration input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keyward_core::{Email, UserId};

/// A user as the directory stores it.
///
/// Deliberately credential-free: password and credential handling live with
/// the identity provider, not in this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration input before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}
