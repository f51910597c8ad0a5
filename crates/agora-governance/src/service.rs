//! The governance service: shared state and construction.

use std::sync::Arc;

use agora_notify::{NotificationContent, Notifier};
use agora_storage::{Store, StoreTxn};

use crate::config::GovernanceConfig;
use crate::error::GovernanceError;
use crate::tokens::PendingVerifications;

/// The club governance engine.
///
/// All operations run against the record store through serializable
/// transactions and funnel every role change through the role
/// synchronizer. Construct one per process and share it.
pub struct Governance {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) config: GovernanceConfig,
    pub(crate) pending: PendingVerifications,
}

impl Governance {
    pub fn new(
        store: Arc<dyn Store>,
        notifier: Arc<dyn Notifier>,
        config: GovernanceConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
            pending: PendingVerifications::new(),
        }
    }

    /// The underlying record store. Embedders use this to seed users and
    /// run their own read-only queries.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub(crate) async fn begin(&self) -> Result<Box<dyn StoreTxn>, GovernanceError> {
        Ok(self.store.begin().await?)
    }

    /// Best-effort delivery, only ever called after the transaction has
    /// committed. Failures are logged and swallowed; they must never
    /// surface as governance errors.
    pub(crate) async fn dispatch(&self, to: &str, content: NotificationContent) {
        if let Err(e) = self
            .notifier
            .notify(to, &content.subject, &content.body)
            .await
        {
            tracing::warn!(to, error = %e, "failed to deliver notification");
        }
    }
}
