//! Role and status enums shared across the platform.

use std::str::FromStr;

/// Coarse role stored on a user, derived from their club relations.
///
/// `Head` wins over `Executive`, which wins over `Member`. `Admin` is only
/// ever set manually and is never produced or removed by recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserRole {
    Member,
    Executive,
    Head,
    Admin,
}

/// Error type for parsing UserRole from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUserRoleError(pub String);

impl std::fmt::Display for ParseUserRoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid user role: {}", self.0)
    }
}

impl std::error::Error for ParseUserRoleError {}

impl FromStr for UserRole {
    type Err = ParseUserRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(UserRole::Member),
            "executive" => Ok(UserRole::Executive),
            "head" => Ok(UserRole::Head),
            "admin" => Ok(UserRole::Admin),
            _ => Err(ParseUserRoleError(s.to_string())),
        }
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Executive => "executive",
            UserRole::Head => "head",
            UserRole::Admin => "admin",
        }
    }
}

/// Lifecycle status of a club registration.
///
/// A club transitions once: `Pending -> Approved` or `Pending -> Rejected`.
/// Both outcomes are terminal for that submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClubStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for ClubStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClubStatus::Pending),
            "approved" => Ok(ClubStatus::Approved),
            "rejected" => Ok(ClubStatus::Rejected),
            _ => Err(format!("invalid club status: {}", s)),
        }
    }
}

impl ClubStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubStatus::Pending => "pending",
            ClubStatus::Approved => "approved",
            ClubStatus::Rejected => "rejected",
        }
    }
}

/// Status of a membership request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(format!("invalid request status: {}", s)),
        }
    }
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}
