//! Club registration workflow: submission, pending verification, and the
//! approve/reject transition with its side effects.

use agora_notify::NotificationContent;
use agora_storage::{
    Club, ClubId, ClubStatus, CreateClubParams, UserId, UserRole, CLUB_HEAD_POSITION,
};

use crate::error::{GovernanceError, StoreResultExt};
use crate::executives::ensure_active_membership;
use crate::roles::sync_user_role;
use crate::service::Governance;
use crate::transfer::assert_executive_position;

/// Outcome of a registration submission.
///
/// The token is also delivered to every active admin through the
/// notifier; whether the embedding surface exposes it to the caller is
/// its own decision.
#[derive(Debug)]
pub struct SubmittedRegistration {
    pub club: Club,
    pub token: String,
}

impl Governance {
    /// Submit a club registration.
    ///
    /// Creates the club in PENDING status (active, head-designate set, no
    /// membership or executive rows yet) and issues a single-use
    /// verification token bound to the new club. Fails with `Conflict` on
    /// a case-insensitive name collision with any existing club; names
    /// are never recycled, rejected ones included.
    pub async fn submit_registration(
        &self,
        name: &str,
        description: &str,
        head_user_id: &UserId,
    ) -> Result<SubmittedRegistration, GovernanceError> {
        let mut txn = self.begin().await?;
        if txn.club_name_exists(name).await? {
            return Err(GovernanceError::Conflict(
                "club name is already in use".to_string(),
            ));
        }
        let head = txn.get_user(head_user_id).await.or_not_found("user")?;
        let club = txn
            .insert_club(&CreateClubParams {
                name: name.to_string(),
                description: description.to_string(),
                head_user_id: head_user_id.clone(),
            })
            .await?;
        let admins = txn.list_users_by_role(UserRole::Admin).await?;
        txn.commit().await?;

        // Issued only after the commit so a rolled-back submission never
        // leaves a live token behind.
        let token = self.pending.issue(club.id.clone(), self.config.token_ttl);
        tracing::info!(club = %club.id.0, name = %club.name, "club registration submitted");

        for admin in admins.iter().filter(|a| a.active) {
            self.dispatch(
                &admin.email,
                NotificationContent::registration_submitted(&club.name, &head.full_name(), &token),
            )
            .await;
        }

        Ok(SubmittedRegistration { club, token })
    }

    /// Approve a pending registration.
    ///
    /// Guards: the token must be bound to this exact club
    /// (`Unauthorized` otherwise) and the club must still be PENDING
    /// (`PreconditionFailed` otherwise, in which case the token stays
    /// usable). On success the head is seeded as active member and active
    /// `"Club Head"` executive, their role is resynchronized, the token is
    /// consumed, and the head is notified.
    pub async fn approve_registration(
        &self,
        club_id: &ClubId,
        token: &str,
    ) -> Result<Club, GovernanceError> {
        self.verify_token(club_id, token)?;

        let mut txn = self.begin().await?;
        let mut club = txn.get_club(club_id).await.or_not_found("club")?;
        if club.status != ClubStatus::Pending {
            return Err(GovernanceError::PreconditionFailed(
                "club is not in pending status".to_string(),
            ));
        }
        club.status = ClubStatus::Approved;
        txn.save_club(&club).await?;

        let head_user_id = club.head_user_id.clone();
        ensure_active_membership(txn.as_mut(), club_id, &head_user_id).await?;
        assert_executive_position(txn.as_mut(), club_id, &head_user_id, CLUB_HEAD_POSITION).await?;
        sync_user_role(txn.as_mut(), &head_user_id).await?;

        let head = txn.get_user(&head_user_id).await.or_not_found("user")?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;
        txn.commit().await?;

        self.pending.consume(token);
        tracing::info!(club = %club.id.0, name = %club.name, "club registration approved");
        self.dispatch(
            &head.email,
            NotificationContent::registration_approved(&club.name),
        )
        .await;
        Ok(club)
    }

    /// Reject a pending registration.
    ///
    /// Same guards as approval. The club is marked REJECTED and inactive;
    /// no membership or executive rows are created. The head-designate is
    /// notified with the reason and the token is consumed.
    pub async fn reject_registration(
        &self,
        club_id: &ClubId,
        token: &str,
        reason: &str,
    ) -> Result<Club, GovernanceError> {
        self.verify_token(club_id, token)?;

        let mut txn = self.begin().await?;
        let mut club = txn.get_club(club_id).await.or_not_found("club")?;
        if club.status != ClubStatus::Pending {
            return Err(GovernanceError::PreconditionFailed(
                "club is not in pending status".to_string(),
            ));
        }
        club.status = ClubStatus::Rejected;
        club.active = false;
        txn.save_club(&club).await?;

        let head = txn.get_user(&club.head_user_id).await.or_not_found("user")?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;
        txn.commit().await?;

        self.pending.consume(token);
        tracing::info!(club = %club.id.0, name = %club.name, "club registration rejected");
        self.dispatch(
            &head.email,
            NotificationContent::registration_rejected(&club.name, reason),
        )
        .await;
        Ok(club)
    }

    /// Whether a club name is still free (case-insensitive, all statuses).
    pub async fn is_club_name_available(&self, name: &str) -> Result<bool, GovernanceError> {
        let mut txn = self.begin().await?;
        Ok(!txn.club_name_exists(name).await?)
    }

    /// Registrations waiting for a verdict.
    pub async fn pending_registrations(&self) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        Ok(txn.list_clubs_by_status(ClubStatus::Pending).await?)
    }

    /// Registrations that were turned down.
    pub async fn rejected_registrations(&self) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        Ok(txn.list_clubs_by_status(ClubStatus::Rejected).await?)
    }

    /// A single pending registration by club id.
    pub async fn pending_registration(&self, club_id: &ClubId) -> Result<Club, GovernanceError> {
        let mut txn = self.begin().await?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;
        if club.status != ClubStatus::Pending {
            return Err(GovernanceError::PreconditionFailed(
                "club is not in pending status".to_string(),
            ));
        }
        Ok(club)
    }

    fn verify_token(&self, club_id: &ClubId, token: &str) -> Result<(), GovernanceError> {
        match self.pending.club_for(token) {
            Some(bound) if &bound == club_id => Ok(()),
            _ => Err(GovernanceError::Unauthorized(
                "invalid or expired verification token".to_string(),
            )),
        }
    }
}
