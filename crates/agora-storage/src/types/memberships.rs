//! Membership record types.

use chrono::{DateTime, Utc};

use super::{ClubId, UserId};

/// Membership row, keyed by `(club_id, user_id)`.
///
/// Rows are soft-deleted: removal flips `active` and stamps `leave_date`,
/// reactivation resets `join_date` and clears `leave_date`. Inactive rows
/// are kept as history. At most one row exists per pair.
#[derive(Clone, Debug)]
pub struct Membership {
    pub club_id: ClubId,
    pub user_id: UserId,
    pub active: bool,
    pub join_date: DateTime<Utc>,
    pub leave_date: Option<DateTime<Utc>>,
}

impl Membership {
    /// Fresh active row joining `user_id` to `club_id` now.
    pub fn joining(club_id: ClubId, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            club_id,
            user_id,
            active: true,
            join_date: now,
            leave_date: None,
        }
    }
}
