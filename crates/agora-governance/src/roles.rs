//! Role synchronization: the single authority for a user's coarse role.
//!
//! Call sites never set `User::role` directly (the one exception being the
//! manual admin grant below). Every mutation that can change a user's club
//! relations calls [`sync_user_role`] inside the same transaction.

use agora_storage::{ClubStatus, StoreTxn, UserId, UserRole};

use crate::error::{GovernanceError, StoreResultExt};
use crate::service::Governance;

/// Recompute a user's coarse role from their relations across all clubs
/// and persist it if it changed. Returns the (possibly unchanged) role.
///
/// Precedence: heading at least one APPROVED club makes the user `Head`;
/// otherwise any active executive row makes them `Executive`; otherwise
/// they are a plain `Member`. A manually granted `Admin` is left alone.
pub(crate) async fn sync_user_role(
    txn: &mut dyn StoreTxn,
    user_id: &UserId,
) -> Result<UserRole, GovernanceError> {
    let mut user = txn.get_user(user_id).await.or_not_found("user")?;
    if user.role == UserRole::Admin {
        return Ok(UserRole::Admin);
    }

    let heads_a_club = txn
        .list_clubs_headed_by(user_id)
        .await?
        .iter()
        .any(|c| c.status == ClubStatus::Approved);

    let role = if heads_a_club {
        UserRole::Head
    } else if !txn.list_active_executives_for_user(user_id).await?.is_empty() {
        UserRole::Executive
    } else {
        UserRole::Member
    };

    if user.role != role {
        tracing::debug!(user = %user.id.0, from = user.role.as_str(), to = role.as_str(), "role resynchronized");
        user.role = role;
        txn.save_user(&user).await?;
    }
    Ok(role)
}

impl Governance {
    /// Manually grant the ADMIN role. Idempotent.
    pub async fn grant_admin(&self, user_id: &UserId) -> Result<(), GovernanceError> {
        let mut txn = self.begin().await?;
        let mut user = txn.get_user(user_id).await.or_not_found("user")?;
        if user.role != UserRole::Admin {
            user.role = UserRole::Admin;
            txn.save_user(&user).await?;
        }
        txn.commit().await?;
        tracing::info!(user = %user_id.0, "admin role granted");
        Ok(())
    }

    /// Drop a manual ADMIN grant and fall back to the role derived from
    /// the user's club relations.
    pub async fn revoke_admin(&self, user_id: &UserId) -> Result<UserRole, GovernanceError> {
        let mut txn = self.begin().await?;
        let mut user = txn.get_user(user_id).await.or_not_found("user")?;
        if user.role != UserRole::Admin {
            return Err(GovernanceError::PreconditionFailed(
                "user is not an admin".to_string(),
            ));
        }
        // Clear the grant first; the synchronizer never touches admins.
        user.role = UserRole::Member;
        txn.save_user(&user).await?;
        let role = sync_user_role(txn.as_mut(), user_id).await?;
        txn.commit().await?;
        tracing::info!(user = %user_id.0, role = role.as_str(), "admin role revoked");
        Ok(role)
    }
}
