//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use uuid::Uuid;

/// User identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

/// Club identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClubId(pub Uuid);

/// Membership-request identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub Uuid);
