//! Membership-request record types.

use chrono::{DateTime, Utc};

use super::{ClubId, RequestId, RequestStatus, UserId};

/// A user-initiated request to join a club.
///
/// At most one PENDING request exists per `(user, club)` pair. Requests are
/// terminal-transitioned by an authorized processor; a requester cancelling
/// their own pending request deletes the row.
#[derive(Clone, Debug)]
pub struct MembershipRequest {
    pub id: RequestId,
    pub club_id: ClubId,
    pub user_id: UserId,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
    pub processed_by: Option<UserId>,
    pub processed_at: Option<DateTime<Utc>>,
    pub response_message: Option<String>,
}

/// Parameters for creating a membership request
#[derive(Clone, Debug)]
pub struct CreateRequestParams {
    pub club_id: ClubId,
    pub user_id: UserId,
    pub message: Option<String>,
}
