//! Membership ledger: member add/remove/reactivate and roster queries.

use chrono::Utc;

use agora_storage::{Club, ClubId, Membership, User, UserId};

use crate::error::{GovernanceError, StoreResultExt};
use crate::service::Governance;

impl Governance {
    /// Add a user as an active member of a club.
    ///
    /// Fails with `Conflict` if an active membership already exists.
    /// Re-adding over a historical (inactive) row starts a fresh stint:
    /// `join_date` resets and `leave_date` clears.
    pub async fn add_member(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Membership, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        txn.get_user(user_id).await.or_not_found("user")?;

        if let Ok(existing) = txn.get_membership(club_id, user_id).await {
            if existing.active {
                return Err(GovernanceError::Conflict(
                    "user is already a member of this club".to_string(),
                ));
            }
        }

        let membership = Membership::joining(club_id.clone(), user_id.clone(), Utc::now());
        txn.put_membership(&membership).await?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, user = %user_id.0, "member added");
        Ok(membership)
    }

    /// Soft-remove a member: flips `active` and stamps `leave_date`.
    ///
    /// The club head cannot be removed, and executives must be demoted
    /// before they can be removed as members.
    pub async fn remove_member(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<(), GovernanceError> {
        let mut txn = self.begin().await?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;

        if &club.head_user_id == user_id {
            return Err(GovernanceError::PreconditionFailed(
                "cannot remove the club head as a member".to_string(),
            ));
        }
        if let Ok(executive) = txn.get_executive(club_id, user_id).await {
            if executive.active {
                return Err(GovernanceError::PreconditionFailed(
                    "cannot remove an executive; demote them first".to_string(),
                ));
            }
        }

        let mut membership = txn
            .get_membership(club_id, user_id)
            .await
            .or_not_found("membership")?;
        if !membership.active {
            return Err(GovernanceError::NotFound(
                "active membership".to_string(),
            ));
        }
        membership.active = false;
        membership.leave_date = Some(Utc::now());
        txn.put_membership(&membership).await?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, user = %user_id.0, "member removed");
        Ok(())
    }

    /// Bring a previously removed member back: `join_date` resets to now
    /// and `leave_date` clears.
    ///
    /// Fails with `NotFound` if the user was never a member of the club
    /// and with `Conflict` if the membership is already active.
    pub async fn reactivate_member(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Membership, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut membership = txn
            .get_membership(club_id, user_id)
            .await
            .or_not_found("membership")?;
        if membership.active {
            return Err(GovernanceError::Conflict(
                "member is already active".to_string(),
            ));
        }
        membership.active = true;
        membership.join_date = Utc::now();
        membership.leave_date = None;
        txn.put_membership(&membership).await?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, user = %user_id.0, "member reactivated");
        Ok(membership)
    }

    // ───────────────────────────────── Queries ────────────────────────────────────

    /// Active members of a club.
    pub async fn active_members(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        let rows = txn.list_memberships_for_club(club_id).await?;
        Ok(rows.into_iter().filter(|m| m.active).collect())
    }

    /// Full membership history of a club, active and inactive rows alike.
    pub async fn member_history(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        Ok(txn.list_memberships_for_club(club_id).await?)
    }

    /// Number of active members in a club.
    pub async fn active_member_count(&self, club_id: &ClubId) -> Result<u64, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        Ok(txn.count_active_members(club_id).await?)
    }

    /// Active members of a club whose name contains `pattern`
    /// (case-insensitive).
    pub async fn search_members(
        &self,
        club_id: &ClubId,
        pattern: &str,
    ) -> Result<Vec<User>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        let needle = pattern.to_lowercase();
        let mut matches = Vec::new();
        for membership in txn.list_memberships_for_club(club_id).await? {
            if !membership.active {
                continue;
            }
            let user = txn
                .get_user(&membership.user_id)
                .await
                .or_not_found("user")?;
            if user.full_name().to_lowercase().contains(&needle) {
                matches.push(user);
            }
        }
        Ok(matches)
    }

    /// Whether the user is an active member of the club.
    pub async fn is_member(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<bool, GovernanceError> {
        let mut txn = self.begin().await?;
        Ok(txn
            .get_membership(club_id, user_id)
            .await
            .map(|m| m.active)
            .unwrap_or(false))
    }

    /// Clubs where the user currently holds an active membership.
    pub async fn clubs_with_member(&self, user_id: &UserId) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut clubs = Vec::new();
        for membership in txn.list_active_memberships_for_user(user_id).await? {
            clubs.push(txn.get_club(&membership.club_id).await.or_not_found("club")?);
        }
        Ok(clubs)
    }
}
