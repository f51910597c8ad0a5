//! Membership-request workflow: user-initiated join requests, processed
//! by the club head, an active executive, or an admin.

use chrono::Utc;

use agora_notify::NotificationContent;
use agora_storage::{
    ClubId, CreateRequestParams, Membership, MembershipRequest, RequestId, RequestStatus,
    UserId, UserRole,
};

use crate::error::{GovernanceError, StoreResultExt};
use crate::service::Governance;

impl Governance {
    /// File a request to join a club.
    ///
    /// The club must be APPROVED and active; the user must not already be
    /// an active member; and at most one PENDING request may exist per
    /// `(user, club)` pair.
    pub async fn request_membership(
        &self,
        user_id: &UserId,
        club_id: &ClubId,
        message: Option<String>,
    ) -> Result<MembershipRequest, GovernanceError> {
        let mut txn = self.begin().await?;
        let user = txn.get_user(user_id).await.or_not_found("user")?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;

        if club.status != agora_storage::ClubStatus::Approved || !club.active {
            return Err(GovernanceError::PreconditionFailed(
                "club is not active or approved".to_string(),
            ));
        }
        if let Ok(membership) = txn.get_membership(club_id, user_id).await {
            if membership.active {
                return Err(GovernanceError::Conflict(
                    "user is already a member of this club".to_string(),
                ));
            }
        }
        if txn.find_pending_request(club_id, user_id).await.is_ok() {
            return Err(GovernanceError::Conflict(
                "a pending request already exists for this user and club".to_string(),
            ));
        }

        let request = txn
            .insert_request(&CreateRequestParams {
                club_id: club_id.clone(),
                user_id: user_id.clone(),
                message,
            })
            .await?;
        let head = txn.get_user(&club.head_user_id).await.or_not_found("user")?;
        txn.commit().await?;

        tracing::info!(club = %club_id.0, user = %user_id.0, "membership request filed");
        self.dispatch(
            &head.email,
            NotificationContent::request_received(&club.name, &user.full_name()),
        )
        .await;
        Ok(request)
    }

    /// Approve a pending request. The processor must be the club head, an
    /// active executive of that club, or an admin. Delegates the actual
    /// join to the membership ledger rules.
    pub async fn approve_request(
        &self,
        request_id: &RequestId,
        processor_id: &UserId,
        response_message: Option<String>,
    ) -> Result<MembershipRequest, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut request = txn
            .get_request(request_id)
            .await
            .or_not_found("membership request")?;
        if request.status != RequestStatus::Pending {
            return Err(GovernanceError::PreconditionFailed(
                "request is already processed".to_string(),
            ));
        }
        let club = txn.get_club(&request.club_id).await.or_not_found("club")?;
        self.authorize_processor(txn.as_mut(), processor_id, &club)
            .await?;

        // Same rule as MembershipLedger::add_member: an active membership
        // that appeared since the request was filed is a conflict.
        if let Ok(membership) = txn.get_membership(&request.club_id, &request.user_id).await {
            if membership.active {
                return Err(GovernanceError::Conflict(
                    "user is already a member of this club".to_string(),
                ));
            }
        }
        let membership = Membership::joining(
            request.club_id.clone(),
            request.user_id.clone(),
            Utc::now(),
        );
        txn.put_membership(&membership).await?;

        request.status = RequestStatus::Approved;
        request.processed_by = Some(processor_id.clone());
        request.processed_at = Some(Utc::now());
        request.response_message = response_message;
        txn.save_request(&request).await?;

        let requester = txn.get_user(&request.user_id).await.or_not_found("user")?;
        txn.commit().await?;

        tracing::info!(request = %request_id.0, club = %club.id.0, "membership request approved");
        self.dispatch(
            &requester.email,
            NotificationContent::request_approved(&club.name),
        )
        .await;
        Ok(request)
    }

    /// Reject a pending request. Same authorization as approval; no
    /// membership row is touched.
    pub async fn reject_request(
        &self,
        request_id: &RequestId,
        processor_id: &UserId,
        response_message: Option<String>,
    ) -> Result<MembershipRequest, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut request = txn
            .get_request(request_id)
            .await
            .or_not_found("membership request")?;
        if request.status != RequestStatus::Pending {
            return Err(GovernanceError::PreconditionFailed(
                "request is already processed".to_string(),
            ));
        }
        let club = txn.get_club(&request.club_id).await.or_not_found("club")?;
        self.authorize_processor(txn.as_mut(), processor_id, &club)
            .await?;

        request.status = RequestStatus::Rejected;
        request.processed_by = Some(processor_id.clone());
        request.processed_at = Some(Utc::now());
        request.response_message = response_message;
        txn.save_request(&request).await?;

        let requester = txn.get_user(&request.user_id).await.or_not_found("user")?;
        txn.commit().await?;

        tracing::info!(request = %request_id.0, club = %club.id.0, "membership request rejected");
        self.dispatch(
            &requester.email,
            NotificationContent::request_rejected(&club.name, request.response_message.as_deref()),
        )
        .await;
        Ok(request)
    }

    /// Withdraw a pending request. Only the original requester may cancel,
    /// and only while the request is still PENDING. The row is deleted.
    pub async fn cancel_request(
        &self,
        request_id: &RequestId,
        user_id: &UserId,
    ) -> Result<MembershipRequest, GovernanceError> {
        let mut txn = self.begin().await?;
        let request = txn
            .get_request(request_id)
            .await
            .or_not_found("membership request")?;
        if request.status != RequestStatus::Pending {
            return Err(GovernanceError::PreconditionFailed(
                "request is already processed".to_string(),
            ));
        }
        if &request.user_id != user_id {
            return Err(GovernanceError::Unauthorized(
                "only the requester can cancel the request".to_string(),
            ));
        }
        txn.delete_request(request_id).await?;
        txn.commit().await?;
        tracing::info!(request = %request_id.0, "membership request cancelled");
        Ok(request)
    }

    // ───────────────────────────────── Queries ────────────────────────────────────

    /// A single request by id.
    pub async fn request(&self, request_id: &RequestId) -> Result<MembershipRequest, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_request(request_id)
            .await
            .or_not_found("membership request")
    }

    /// Requests still awaiting a verdict for a club.
    pub async fn pending_requests_for_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<MembershipRequest>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        let rows = txn.list_requests_for_club(club_id).await?;
        Ok(rows
            .into_iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .collect())
    }

    /// Every request ever filed against a club.
    pub async fn requests_for_club(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<MembershipRequest>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        Ok(txn.list_requests_for_club(club_id).await?)
    }

    /// Every request a user has filed.
    pub async fn requests_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipRequest>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_user(user_id).await.or_not_found("user")?;
        Ok(txn.list_requests_for_user(user_id).await?)
    }

    /// A user's requests still awaiting a verdict.
    pub async fn pending_requests_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipRequest>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_user(user_id).await.or_not_found("user")?;
        let rows = txn.list_requests_for_user(user_id).await?;
        Ok(rows
            .into_iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .collect())
    }

    /// Capability-set check: the processor qualifies through any of the
    /// three conditions, evaluated fresh on every call. This is not a
    /// role hierarchy.
    async fn authorize_processor(
        &self,
        txn: &mut dyn agora_storage::StoreTxn,
        processor_id: &UserId,
        club: &agora_storage::Club,
    ) -> Result<(), GovernanceError> {
        let processor = txn.get_user(processor_id).await.or_not_found("user")?;

        let is_admin = processor.role == UserRole::Admin;
        let is_head = club.head_user_id == processor.id;
        let is_executive = txn
            .get_executive(&club.id, processor_id)
            .await
            .map(|e| e.active)
            .unwrap_or(false);

        if is_admin || is_head || is_executive {
            Ok(())
        } else {
            Err(GovernanceError::Unauthorized(
                "user is not authorized to process membership requests for this club".to_string(),
            ))
        }
    }
}
