//! Club-head transfer: moves headship and reconciles membership,
//! executive rows, and both users' roles in one transaction.

use chrono::Utc;

use agora_storage::{
    Club, ClubId, ClubStatus, Executive, StoreTxn, UserId, CLUB_HEAD_POSITION,
    FORMER_CLUB_HEAD_POSITION,
};

use crate::error::{GovernanceError, StoreResultExt};
use crate::executives::ensure_active_membership;
use crate::roles::sync_user_role;
use crate::service::Governance;

/// Set (or create) the user's executive row with the given position,
/// reactivating a historical row if that is what exists.
pub(crate) async fn assert_executive_position(
    txn: &mut dyn StoreTxn,
    club_id: &ClubId,
    user_id: &UserId,
    position: &str,
) -> Result<(), GovernanceError> {
    match txn.get_executive(club_id, user_id).await {
        Ok(mut executive) => {
            if !executive.active {
                executive.active = true;
                executive.join_date = Utc::now();
                executive.leave_date = None;
            }
            executive.position = position.to_string();
            txn.put_executive(&executive).await?;
            Ok(())
        }
        Err(agora_storage::StoreError::NotFound) => {
            let executive =
                Executive::appointed(club_id.clone(), user_id.clone(), position, Utc::now());
            txn.put_executive(&executive).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

impl Governance {
    /// Transfer a club's headship to `new_head_user_id`.
    ///
    /// The new head is made an active member and an active executive with
    /// position `"Club Head"`; the previous head keeps an active executive
    /// row relabeled `"Former Club Head"` (demoted heads are relabeled,
    /// never removed) and predictably lands on the `Executive` role. The
    /// whole transfer commits atomically: the club can never be observed
    /// with zero or two heads.
    pub async fn change_head(
        &self,
        club_id: &ClubId,
        new_head_user_id: &UserId,
    ) -> Result<Club, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut club = txn.get_club(club_id).await.or_not_found("club")?;
        if club.status != ClubStatus::Approved {
            return Err(GovernanceError::PreconditionFailed(
                "club must be approved before transferring headship".to_string(),
            ));
        }
        txn.get_user(new_head_user_id).await.or_not_found("user")?;

        let previous_head = club.head_user_id.clone();

        ensure_active_membership(txn.as_mut(), club_id, new_head_user_id).await?;
        assert_executive_position(txn.as_mut(), club_id, new_head_user_id, CLUB_HEAD_POSITION)
            .await?;

        club.head_user_id = new_head_user_id.clone();
        txn.save_club(&club).await?;

        if &previous_head != new_head_user_id {
            assert_executive_position(
                txn.as_mut(),
                club_id,
                &previous_head,
                FORMER_CLUB_HEAD_POSITION,
            )
            .await?;
            sync_user_role(txn.as_mut(), &previous_head).await?;
        }
        sync_user_role(txn.as_mut(), new_head_user_id).await?;

        let club = txn.get_club(club_id).await.or_not_found("club")?;
        txn.commit().await?;
        tracing::info!(
            club = %club_id.0,
            previous_head = %previous_head.0,
            new_head = %new_head_user_id.0,
            "club head transferred"
        );
        Ok(club)
    }
}
