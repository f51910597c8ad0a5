//! In-memory store implementation with serializable transactions.
//!
//! This implementation is suitable for:
//! - Tests and development
//! - Single-process embedding where durability is not required
//!
//! Transactions take a whole-store lock and mutate a working copy of the
//! state; [`StoreTxn::commit`] swaps the copy in, dropping the handle
//! discards it. That serializes *all* transactions, which is coarser than
//! the row-level locking a SQL backend would do but upholds the same
//! guarantee: conflicting mutations on the same `(club, user)` pair can
//! never interleave.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use agora_storage::{
    Club, ClubId, ClubStatus, CreateClubParams, CreateRequestParams, CreateUserParams, Executive,
    Membership, MembershipRequest, RequestId, RequestStatus, Store, StoreError, StoreTxn, User,
    UserId, UserRole,
};

/// Everything the backend holds, keyed the way the record model is keyed.
#[derive(Clone, Default)]
struct State {
    users: HashMap<Uuid, User>,
    clubs: HashMap<Uuid, Club>,
    // (club_id, user_id) composite keys
    memberships: HashMap<(Uuid, Uuid), Membership>,
    executives: HashMap<(Uuid, Uuid), Executive>,
    requests: HashMap<Uuid, MembershipRequest>,
}

/// In-memory store. Cheap to clone; clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTxn>, StoreError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTxn { guard, working }))
    }
}

/// Open transaction: holds the store lock plus a working copy.
pub struct MemoryTxn {
    guard: OwnedMutexGuard<State>,
    working: State,
}

#[async_trait::async_trait]
impl StoreTxn for MemoryTxn {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    async fn get_user(&mut self, user_id: &UserId) -> Result<User, StoreError> {
        self.working
            .users
            .get(&user_id.0)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_email(&mut self, email: &str) -> Result<User, StoreError> {
        self.working
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_user(&mut self, params: &CreateUserParams) -> Result<User, StoreError> {
        if self
            .working
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&params.email))
        {
            return Err(StoreError::AlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: UserId(Uuid::now_v7()),
            email: params.email.clone(),
            first_name: params.first_name.clone(),
            last_name: params.last_name.clone(),
            role: params.role,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.working.users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn save_user(&mut self, user: &User) -> Result<(), StoreError> {
        if !self.working.users.contains_key(&user.id.0) {
            return Err(StoreError::NotFound);
        }
        let mut user = user.clone();
        user.updated_at = Utc::now();
        self.working.users.insert(user.id.0, user);
        Ok(())
    }

    async fn list_users_by_role(&mut self, role: UserRole) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self
            .working
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    // ───────────────────────────────────── Clubs ──────────────────────────────────────────

    async fn insert_club(&mut self, params: &CreateClubParams) -> Result<Club, StoreError> {
        if self
            .working
            .clubs
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(&params.name))
        {
            return Err(StoreError::AlreadyExists);
        }
        let now = Utc::now();
        let club = Club {
            id: ClubId(Uuid::now_v7()),
            name: params.name.clone(),
            description: params.description.clone(),
            head_user_id: params.head_user_id.clone(),
            status: ClubStatus::Pending,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.working.clubs.insert(club.id.0, club.clone());
        Ok(club)
    }

    async fn get_club(&mut self, club_id: &ClubId) -> Result<Club, StoreError> {
        self.working
            .clubs
            .get(&club_id.0)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_club(&mut self, club: &Club) -> Result<(), StoreError> {
        if !self.working.clubs.contains_key(&club.id.0) {
            return Err(StoreError::NotFound);
        }
        let mut club = club.clone();
        club.updated_at = Utc::now();
        self.working.clubs.insert(club.id.0, club);
        Ok(())
    }

    async fn club_name_exists(&mut self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .working
            .clubs
            .values()
            .any(|c| c.name.eq_ignore_ascii_case(name)))
    }

    async fn list_clubs(&mut self) -> Result<Vec<Club>, StoreError> {
        let mut clubs: Vec<Club> = self.working.clubs.values().cloned().collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clubs)
    }

    async fn list_clubs_by_status(&mut self, status: ClubStatus) -> Result<Vec<Club>, StoreError> {
        let mut clubs: Vec<Club> = self
            .working
            .clubs
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clubs)
    }

    async fn list_clubs_headed_by(&mut self, user_id: &UserId) -> Result<Vec<Club>, StoreError> {
        let mut clubs: Vec<Club> = self
            .working
            .clubs
            .values()
            .filter(|c| &c.head_user_id == user_id)
            .cloned()
            .collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clubs)
    }

    // ─────────────────────────────────── Memberships ──────────────────────────────────────

    async fn get_membership(
        &mut self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError> {
        self.working
            .memberships
            .get(&(club_id.0, user_id.0))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_membership(&mut self, membership: &Membership) -> Result<(), StoreError> {
        self.working.memberships.insert(
            (membership.club_id.0, membership.user_id.0),
            membership.clone(),
        );
        Ok(())
    }

    async fn list_memberships_for_club(
        &mut self,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, StoreError> {
        let mut rows: Vec<Membership> = self
            .working
            .memberships
            .values()
            .filter(|m| &m.club_id == club_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.join_date);
        Ok(rows)
    }

    async fn list_active_memberships_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, StoreError> {
        let mut rows: Vec<Membership> = self
            .working
            .memberships
            .values()
            .filter(|m| &m.user_id == user_id && m.active)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.join_date);
        Ok(rows)
    }

    async fn count_active_members(&mut self, club_id: &ClubId) -> Result<u64, StoreError> {
        Ok(self
            .working
            .memberships
            .values()
            .filter(|m| &m.club_id == club_id && m.active)
            .count() as u64)
    }

    // ─────────────────────────────────── Executives ───────────────────────────────────────

    async fn get_executive(
        &mut self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<Executive, StoreError> {
        self.working
            .executives
            .get(&(club_id.0, user_id.0))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_executive(&mut self, executive: &Executive) -> Result<(), StoreError> {
        self.working.executives.insert(
            (executive.club_id.0, executive.user_id.0),
            executive.clone(),
        );
        Ok(())
    }

    async fn list_executives_for_club(
        &mut self,
        club_id: &ClubId,
    ) -> Result<Vec<Executive>, StoreError> {
        let mut rows: Vec<Executive> = self
            .working
            .executives
            .values()
            .filter(|e| &e.club_id == club_id)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.join_date);
        Ok(rows)
    }

    async fn list_active_executives_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Executive>, StoreError> {
        let mut rows: Vec<Executive> = self
            .working
            .executives
            .values()
            .filter(|e| &e.user_id == user_id && e.active)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.join_date);
        Ok(rows)
    }

    // ──────────────────────────────── Membership requests ─────────────────────────────────

    async fn insert_request(
        &mut self,
        params: &CreateRequestParams,
    ) -> Result<MembershipRequest, StoreError> {
        // Mirrors the unique index a SQL backend would hold on
        // (club_id, user_id) WHERE status = 'pending'.
        if self.working.requests.values().any(|r| {
            r.club_id == params.club_id
                && r.user_id == params.user_id
                && r.status == RequestStatus::Pending
        }) {
            return Err(StoreError::AlreadyExists);
        }
        let request = MembershipRequest {
            id: RequestId(Uuid::now_v7()),
            club_id: params.club_id.clone(),
            user_id: params.user_id.clone(),
            message: params.message.clone(),
            status: RequestStatus::Pending,
            request_date: Utc::now(),
            processed_by: None,
            processed_at: None,
            response_message: None,
        };
        self.working.requests.insert(request.id.0, request.clone());
        Ok(request)
    }

    async fn get_request(
        &mut self,
        request_id: &RequestId,
    ) -> Result<MembershipRequest, StoreError> {
        self.working
            .requests
            .get(&request_id.0)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn save_request(&mut self, request: &MembershipRequest) -> Result<(), StoreError> {
        if !self.working.requests.contains_key(&request.id.0) {
            return Err(StoreError::NotFound);
        }
        self.working.requests.insert(request.id.0, request.clone());
        Ok(())
    }

    async fn find_pending_request(
        &mut self,
        club_id: &ClubId,
        user_id: &UserId,
    ) -> Result<MembershipRequest, StoreError> {
        self.working
            .requests
            .values()
            .find(|r| {
                &r.club_id == club_id
                    && &r.user_id == user_id
                    && r.status == RequestStatus::Pending
            })
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_requests_for_club(
        &mut self,
        club_id: &ClubId,
    ) -> Result<Vec<MembershipRequest>, StoreError> {
        let mut rows: Vec<MembershipRequest> = self
            .working
            .requests
            .values()
            .filter(|r| &r.club_id == club_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.request_date);
        Ok(rows)
    }

    async fn list_requests_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<MembershipRequest>, StoreError> {
        let mut rows: Vec<MembershipRequest> = self
            .working
            .requests
            .values()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.request_date);
        Ok(rows)
    }

    async fn delete_request(&mut self, request_id: &RequestId) -> Result<(), StoreError> {
        self.working
            .requests
            .remove(&request_id.0)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    // ─────────────────────────────────── Lifecycle ────────────────────────────────────────

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTxn { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
