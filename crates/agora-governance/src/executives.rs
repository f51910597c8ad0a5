//! Executive ledger: appointment, demotion, position changes, and the
//! club-head restriction.

use chrono::Utc;

use agora_storage::{
    Club, ClubId, Executive, Membership, StoreTxn, UserId, CLUB_HEAD_POSITION,
};

use crate::error::{GovernanceError, StoreResultExt};
use crate::roles::sync_user_role;
use crate::service::Governance;

/// Make sure `user_id` holds an active membership in `club_id`,
/// creating or reactivating the row as needed. Executives are always
/// members, so every appointment path funnels through here.
pub(crate) async fn ensure_active_membership(
    txn: &mut dyn StoreTxn,
    club_id: &ClubId,
    user_id: &UserId,
) -> Result<(), GovernanceError> {
    match txn.get_membership(club_id, user_id).await {
        Ok(membership) if membership.active => Ok(()),
        Ok(mut membership) => {
            membership.active = true;
            membership.join_date = Utc::now();
            membership.leave_date = None;
            txn.put_membership(&membership).await?;
            Ok(())
        }
        Err(agora_storage::StoreError::NotFound) => {
            let membership = Membership::joining(club_id.clone(), user_id.clone(), Utc::now());
            txn.put_membership(&membership).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

impl Governance {
    /// Appoint a user as an executive of a club.
    ///
    /// Fails with `Conflict` if the user already holds an active
    /// executive row for the club. Adds an active membership first if the
    /// user has none. Resynchronizes the user's role.
    pub async fn add_executive(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
        position: &str,
    ) -> Result<Executive, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        txn.get_user(user_id).await.or_not_found("user")?;

        if let Ok(existing) = txn.get_executive(club_id, user_id).await {
            if existing.active {
                return Err(GovernanceError::Conflict(
                    "user is already an executive in this club".to_string(),
                ));
            }
        }

        ensure_active_membership(txn.as_mut(), club_id, user_id).await?;

        let executive =
            Executive::appointed(club_id.clone(), user_id.clone(), position, Utc::now());
        txn.put_executive(&executive).await?;
        sync_user_role(txn.as_mut(), user_id).await?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, user = %user_id.0, position, "executive added");
        Ok(executive)
    }

    /// Demote an executive: flips `active`, stamps `leave_date`, and
    /// resynchronizes the role (which may fall back to `Member` if the
    /// user holds no other executive seat anywhere).
    ///
    /// The club head cannot be demoted here; headship only moves through
    /// [`Governance::change_head`].
    pub async fn remove_executive(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<(), GovernanceError> {
        let mut txn = self.begin().await?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;

        if &club.head_user_id == user_id {
            return Err(GovernanceError::PreconditionFailed(
                "cannot remove the club head as an executive; transfer headship first".to_string(),
            ));
        }

        let mut executive = txn
            .get_executive(club_id, user_id)
            .await
            .or_not_found("executive")?;
        if !executive.active {
            return Err(GovernanceError::NotFound("active executive".to_string()));
        }
        executive.active = false;
        executive.leave_date = Some(Utc::now());
        txn.put_executive(&executive).await?;
        sync_user_role(txn.as_mut(), user_id).await?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, user = %user_id.0, "executive removed");
        Ok(())
    }

    /// Change an executive's position label.
    ///
    /// The `"Club Head"` row of the current head is off limits; use
    /// [`Governance::change_head`] for that.
    pub async fn update_position(
        &self,
        user_id: &UserId,
        club_id: &ClubId,
        new_position: &str,
    ) -> Result<Executive, GovernanceError> {
        let mut txn = self.begin().await?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;
        let mut executive = txn
            .get_executive(club_id, user_id)
            .await
            .or_not_found("executive")?;
        if !executive.active {
            return Err(GovernanceError::NotFound("active executive".to_string()));
        }
        if executive.position == CLUB_HEAD_POSITION && &club.head_user_id == user_id {
            return Err(GovernanceError::PreconditionFailed(
                "cannot change the club head position; use change_head instead".to_string(),
            ));
        }
        executive.position = new_position.to_string();
        txn.put_executive(&executive).await?;
        txn.commit().await?;
        Ok(executive)
    }

    /// Bring a previously demoted executive back with a fresh
    /// `join_date`, a cleared `leave_date`, and the given position.
    ///
    /// Fails with `NotFound` if the user never held an executive row in
    /// the club and with `Conflict` if the row is already active. Also
    /// re-ensures an active membership, since executives are always
    /// members.
    pub async fn reactivate_executive(
        &self,
        user_id: &UserId,
        club_id: &ClubId,
        position: &str,
    ) -> Result<Executive, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut executive = txn
            .get_executive(club_id, user_id)
            .await
            .or_not_found("executive")?;
        if executive.active {
            return Err(GovernanceError::Conflict(
                "executive is already active".to_string(),
            ));
        }
        ensure_active_membership(txn.as_mut(), club_id, user_id).await?;
        executive.active = true;
        executive.position = position.to_string();
        executive.join_date = Utc::now();
        executive.leave_date = None;
        txn.put_executive(&executive).await?;
        sync_user_role(txn.as_mut(), user_id).await?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, user = %user_id.0, position, "executive reactivated");
        Ok(executive)
    }

    // ───────────────────────────────── Queries ────────────────────────────────────

    /// Active executives of a club.
    pub async fn active_executives(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Executive>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        let rows = txn.list_executives_for_club(club_id).await?;
        Ok(rows.into_iter().filter(|e| e.active).collect())
    }

    /// Full executive history of a club, including relabeled former heads.
    pub async fn executive_history(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<Executive>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")?;
        Ok(txn.list_executives_for_club(club_id).await?)
    }

    /// The user's active executive row in the club.
    pub async fn executive(
        &self,
        user_id: &UserId,
        club_id: &ClubId,
    ) -> Result<Executive, GovernanceError> {
        let mut txn = self.begin().await?;
        let executive = txn
            .get_executive(club_id, user_id)
            .await
            .or_not_found("executive")?;
        if !executive.active {
            return Err(GovernanceError::NotFound("active executive".to_string()));
        }
        Ok(executive)
    }

    /// Whether the user is an active executive of the club.
    pub async fn is_executive(
        &self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<bool, GovernanceError> {
        let mut txn = self.begin().await?;
        Ok(txn
            .get_executive(club_id, user_id)
            .await
            .map(|e| e.active)
            .unwrap_or(false))
    }

    /// Clubs where the user currently holds an active executive seat.
    pub async fn clubs_with_executive(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut clubs = Vec::new();
        for executive in txn.list_active_executives_for_user(user_id).await? {
            clubs.push(txn.get_club(&executive.club_id).await.or_not_found("club")?);
        }
        Ok(clubs)
    }
}
