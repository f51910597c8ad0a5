//! In-process verification tokens for pending registrations.
//!
//! Tokens are deliberately non-durable: they live only in this map and a
//! process restart invalidates all of them. That is acceptable: the
//! registrant simply resubmits. Do not move these into the record store.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::RngCore;

use agora_storage::ClubId;

struct PendingToken {
    club_id: ClubId,
    expires_at: DateTime<Utc>,
}

/// Single-use, expiring tokens binding an approve/reject action to one
/// pending club.
#[derive(Default)]
pub(crate) struct PendingVerifications {
    tokens: DashMap<String, PendingToken>,
}

impl PendingVerifications {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mint an opaque token bound to `club_id`.
    pub(crate) fn issue(&self, club_id: ClubId, ttl: Duration) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.tokens.insert(
            token.clone(),
            PendingToken {
                club_id,
                expires_at: Utc::now() + ttl,
            },
        );
        token
    }

    /// Club the token is bound to, if the token is known and not expired.
    /// Expired entries are purged on lookup.
    pub(crate) fn club_for(&self, token: &str) -> Option<ClubId> {
        let entry = self.tokens.get(token)?;
        if entry.expires_at < Utc::now() {
            drop(entry);
            self.tokens.remove(token);
            return None;
        }
        Some(entry.club_id.clone())
    }

    /// Consume a token after a successful approve/reject.
    pub(crate) fn consume(&self, token: &str) {
        self.tokens.remove(token);
    }

    /// Register a token directly. Test hook.
    #[cfg(test)]
    pub(crate) fn insert_for_test(
        &self,
        token: &str,
        club_id: ClubId,
        expires_at: DateTime<Utc>,
    ) {
        self.tokens.insert(
            token.to_string(),
            PendingToken {
                club_id,
                expires_at,
            },
        );
    }
}
