//! Club queries and the post-approval activity toggle.

use agora_storage::{Club, ClubId, ClubStatus, UserId};

use crate::error::{GovernanceError, StoreResultExt};
use crate::service::Governance;

impl Governance {
    /// A single club by id.
    pub async fn club(&self, club_id: &ClubId) -> Result<Club, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_club(club_id).await.or_not_found("club")
    }

    /// All clubs, whatever their status.
    pub async fn clubs(&self) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        Ok(txn.list_clubs().await?)
    }

    /// All clubs currently flagged active.
    pub async fn active_clubs(&self) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        let clubs = txn.list_clubs().await?;
        Ok(clubs.into_iter().filter(|c| c.active).collect())
    }

    /// Approved clubs that are also active, i.e. the ones open for joining.
    pub async fn approved_clubs(&self) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        let clubs = txn.list_clubs_by_status(ClubStatus::Approved).await?;
        Ok(clubs.into_iter().filter(|c| c.active).collect())
    }

    /// Clubs the user heads (any status; PENDING entries are
    /// head-designates awaiting a verdict).
    pub async fn clubs_headed_by(&self, user_id: &UserId) -> Result<Vec<Club>, GovernanceError> {
        let mut txn = self.begin().await?;
        txn.get_user(user_id).await.or_not_found("user")?;
        Ok(txn.list_clubs_headed_by(user_id).await?)
    }

    /// Suspend an approved club without touching its roster.
    pub async fn deactivate_club(&self, club_id: &ClubId) -> Result<Club, GovernanceError> {
        self.set_club_active(club_id, false).await
    }

    /// Lift a suspension.
    pub async fn reactivate_club(&self, club_id: &ClubId) -> Result<Club, GovernanceError> {
        self.set_club_active(club_id, true).await
    }

    async fn set_club_active(
        &self,
        club_id: &ClubId,
        active: bool,
    ) -> Result<Club, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut club = txn.get_club(club_id).await.or_not_found("club")?;
        if club.status != ClubStatus::Approved {
            return Err(GovernanceError::PreconditionFailed(
                "only approved clubs can be activated or deactivated".to_string(),
            ));
        }
        club.active = active;
        txn.save_club(&club).await?;
        let club = txn.get_club(club_id).await.or_not_found("club")?;
        txn.commit().await?;
        tracing::info!(club = %club_id.0, active, "club activity toggled");
        Ok(club)
    }
}
