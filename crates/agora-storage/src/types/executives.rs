//! Executive record types.

use chrono::{DateTime, Utc};

use super::{ClubId, UserId};

/// Position label carried by a club's current head.
pub const CLUB_HEAD_POSITION: &str = "Club Head";

/// Position label a head is relabeled to when superseded by a transfer.
/// Demoted heads are never removed, only relabeled, to preserve history.
pub const FORMER_CLUB_HEAD_POSITION: &str = "Former Club Head";

/// Executive row, keyed by `(club_id, user_id)`.
///
/// The row with position [`CLUB_HEAD_POSITION`] must match the club's
/// `head_user_id`. Soft-deletion mirrors [`super::Membership`].
#[derive(Clone, Debug)]
pub struct Executive {
    pub club_id: ClubId,
    pub user_id: UserId,
    pub position: String,
    pub active: bool,
    pub join_date: DateTime<Utc>,
    pub leave_date: Option<DateTime<Utc>>,
}

impl Executive {
    /// Fresh active row for `user_id` holding `position` in `club_id`.
    pub fn appointed(
        club_id: ClubId,
        user_id: UserId,
        position: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            club_id,
            user_id,
            position: position.into(),
            active: true,
            join_date: now,
            leave_date: None,
        }
    }

    /// Whether this row carries the club-head position label.
    pub fn is_head_position(&self) -> bool {
        self.position == CLUB_HEAD_POSITION
    }
}
