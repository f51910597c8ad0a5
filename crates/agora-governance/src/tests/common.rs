//! Common test helpers: engine construction and record seeding.

use std::sync::Arc;

use agora_notify::{MemoryNotifier, Notifier};
use agora_storage::{
    Club, ClubId, CreateUserParams, Store, User, UserId, UserRole, CLUB_HEAD_POSITION,
};
use agora_store_memory::MemoryStore;

use crate::{Governance, GovernanceConfig};

/// Engine over a fresh in-memory store, plus a handle on the recording
/// notifier for delivery assertions.
pub fn create_engine() -> (Governance, Arc<MemoryNotifier>) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let engine = Governance::new(
        store,
        notifier.clone() as Arc<dyn Notifier>,
        GovernanceConfig::default(),
    );
    (engine, notifier)
}

/// Seed a plain user directly through the store, the way the external
/// account-registration flow would.
pub async fn seed_user(engine: &Governance, email: &str, first: &str, last: &str) -> User {
    seed_user_with_role(engine, email, first, last, UserRole::Member).await
}

pub async fn seed_admin(engine: &Governance, email: &str) -> User {
    seed_user_with_role(engine, email, "Site", "Admin", UserRole::Admin).await
}

pub async fn seed_user_with_role(
    engine: &Governance,
    email: &str,
    first: &str,
    last: &str,
    role: UserRole,
) -> User {
    let mut txn = engine.store().begin().await.unwrap();
    let user = txn
        .insert_user(&CreateUserParams {
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role,
        })
        .await
        .unwrap();
    txn.commit().await.unwrap();
    user
}

/// Run the full registration workflow and return the approved club.
pub async fn approved_club(engine: &Governance, name: &str, head_user_id: &UserId) -> Club {
    let submission = engine
        .submit_registration(name, "a club for testing", head_user_id)
        .await
        .unwrap();
    engine
        .approve_registration(&submission.club.id, &submission.token)
        .await
        .unwrap()
}

/// Current coarse role of a user, read straight from the store.
pub async fn role_of(engine: &Governance, user_id: &UserId) -> UserRole {
    let mut txn = engine.store().begin().await.unwrap();
    txn.get_user(user_id).await.unwrap().role
}

/// The head invariant: exactly one active executive row carries the
/// `"Club Head"` position, and it belongs to `Club::head_user_id`.
pub async fn assert_single_head(engine: &Governance, club_id: &ClubId) {
    let club = engine.club(club_id).await.unwrap();
    let heads: Vec<_> = engine
        .active_executives(club_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.position == CLUB_HEAD_POSITION)
        .collect();
    assert_eq!(heads.len(), 1, "expected exactly one active Club Head row");
    assert_eq!(heads[0].user_id, club.head_user_id);
}
