//! Club record types.

use chrono::{DateTime, Utc};

use super::{ClubId, ClubStatus, UserId};

/// Club record.
///
/// `head_user_id` is set at submission time and is never absent: a PENDING
/// club carries its head-designate, an APPROVED club its actual head.
/// Club names are globally unique (case-insensitive) and never recycled,
/// regardless of status.
#[derive(Clone, Debug)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub description: String,
    pub head_user_id: UserId,
    pub status: ClubStatus,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a club (always starts PENDING and active).
#[derive(Clone, Debug)]
pub struct CreateClubParams {
    pub name: String,
    pub description: String,
    pub head_user_id: UserId,
}
