//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// Handle to an open store connection.
///
/// Backends must guarantee that two transactions touching the same records
/// are serialized; the governance engine holds no locks of its own beyond
/// the transaction it is running in.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Open a transaction. All reads observe a consistent snapshot and all
    /// buffered writes land atomically on [`StoreTxn::commit`]; dropping
    /// the handle without committing discards every change.
    async fn begin(&self) -> Result<Box<dyn StoreTxn>, StoreError>;
}

/// A serializable transaction over the record store.
///
/// Every mutating governance operation runs inside exactly one transaction:
/// either every row it touches (club, membership, executive, user role)
/// commits together or none do.
#[async_trait::async_trait]
pub trait StoreTxn: Send {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    /// Get user by ID.
    async fn get_user(&mut self, user_id: &UserId) -> Result<User, StoreError>;

    /// Get user by email.
    async fn get_user_by_email(&mut self, email: &str) -> Result<User, StoreError>;

    /// Create a new user (returns the full record with generated ID).
    async fn insert_user(&mut self, params: &CreateUserParams) -> Result<User, StoreError>;

    /// Persist changes to an existing user.
    async fn save_user(&mut self, user: &User) -> Result<(), StoreError>;

    /// List all users holding the given coarse role.
    async fn list_users_by_role(&mut self, role: UserRole) -> Result<Vec<User>, StoreError>;

    // ───────────────────────────────────── Clubs ──────────────────────────────────────────

    /// Create a new club in PENDING status (returns the full record).
    /// Fails with `AlreadyExists` if the name collides case-insensitively
    /// with any existing club, whatever its status.
    async fn insert_club(&mut self, params: &CreateClubParams) -> Result<Club, StoreError>;

    /// Get club by ID.
    async fn get_club(&mut self, club_id: &ClubId) -> Result<Club, StoreError>;

    /// Persist changes to an existing club.
    async fn save_club(&mut self, club: &Club) -> Result<(), StoreError>;

    /// Case-insensitive name collision check across every status.
    async fn club_name_exists(&mut self, name: &str) -> Result<bool, StoreError>;

    /// List all clubs.
    async fn list_clubs(&mut self) -> Result<Vec<Club>, StoreError>;

    /// List clubs with the given registration status.
    async fn list_clubs_by_status(&mut self, status: ClubStatus) -> Result<Vec<Club>, StoreError>;

    /// List clubs whose `head_user_id` is the given user (any status).
    async fn list_clubs_headed_by(&mut self, user_id: &UserId) -> Result<Vec<Club>, StoreError>;

    // ─────────────────────────────────── Memberships ──────────────────────────────────────

    /// Get the membership row for a pair, active or not.
    async fn get_membership(
        &mut self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError>;

    /// Insert or overwrite the membership row for its `(club, user)` pair.
    async fn put_membership(&mut self, membership: &Membership) -> Result<(), StoreError>;

    /// List all membership rows of a club, active and historical.
    async fn list_memberships_for_club(
        &mut self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, StoreError>;

    /// List a user's active memberships across all clubs.
    async fn list_active_memberships_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, StoreError>;

    /// Count active members of a club.
    async fn count_active_members(&mut self, club_id: &ClubId) -> Result<u64, StoreError>;

    // ─────────────────────────────────── Executives ───────────────────────────────────────

    /// Get the executive row for a pair, active or not.
    async fn get_executive(
        &mut self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Executive, StoreError>;

    /// Insert or overwrite the executive row for its `(club, user)` pair.
    async fn put_executive(&mut self, executive: &Executive) -> Result<(), StoreError>;

    /// List all executive rows of a club, active and historical.
    async fn list_executives_for_club(
        &mut self,
        club_id: &ClubId,
    ) -> Result<Vec<Executive>, StoreError>;

    /// List a user's active executive rows across all clubs.
    async fn list_active_executives_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Executive>, StoreError>;

    // ──────────────────────────────── Membership requests ─────────────────────────────────

    /// Create a membership request in PENDING status (returns the record).
    async fn insert_request(
        &mut self,
        params: &CreateRequestParams,
    ) -> Result<MembershipRequest, StoreError>;

    /// Get request by ID.
    async fn get_request(&mut self, request_id: &RequestId) -> Result<MembershipRequest, StoreError>;

    /// Persist changes to an existing request.
    async fn save_request(&mut self, request: &MembershipRequest) -> Result<(), StoreError>;

    /// Find the PENDING request for a `(club, user)` pair, if any.
    async fn find_pending_request(
        &mut self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipRequest, StoreError>;

    /// List all requests targeting a club.
    async fn list_requests_for_club(
        &mut self,
        club_id: &ClubId,
    ) -> Result<Vec<MembershipRequest>, StoreError>;

    /// List all requests made by a user.
    async fn list_requests_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipRequest>, StoreError>;

    /// Delete a request (requester cancellation).
    async fn delete_request(&mut self, request_id: &RequestId) -> Result<(), StoreError>;

    // ─────────────────────────────────── Lifecycle ────────────────────────────────────────

    /// Atomically apply every buffered change.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
