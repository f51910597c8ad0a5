//! User record types.

use chrono::{DateTime, Utc};

use super::{UserId, UserRole};

/// User record.
///
/// Users are created by the (external) account-registration flow. The
/// governance engine only ever mutates `role`.
#[derive(Clone, Debug)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name, used for roster search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Parameters for creating a user
#[derive(Clone, Debug)]
pub struct CreateUserParams {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}
