//! Notification delivery for the governance workflows.
//!
//! Delivery is best-effort by contract: the governance engine dispatches
//! notifications only after its transaction has committed and swallows any
//! error a provider returns. Nothing in this crate may block or fail a
//! governance operation.

#[cfg(feature = "email-resend")]
mod resend;
#[cfg(feature = "email-smtp")]
mod smtp;
mod templates;

pub use templates::*;

use async_trait::async_trait;
use thiserror::Error;

/// Notification delivery error
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for notification providers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a message to an address (email or device token).
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Provider selection and sender identity.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub provider: ProviderConfig,
    /// From email address
    pub from_address: String,
    /// Optional from name
    pub from_name: Option<String>,
}

/// Notification provider configuration
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// Resend email provider
    Resend {
        #[allow(dead_code)] // Used when email-resend feature is enabled
        api_key: String,
    },
    /// SMTP email provider
    Smtp {
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        use_tls: bool,
    },
}

/// Create a notification provider from configuration
pub fn create_provider(config: &NotifierConfig) -> Result<Box<dyn Notifier>, NotifyError> {
    match &config.provider {
        #[cfg(feature = "email-resend")]
        ProviderConfig::Resend { api_key } => Ok(Box::new(resend::ResendNotifier::new(
            api_key.clone(),
            config.from_address.clone(),
            config.from_name.clone(),
        ))),
        #[cfg(not(feature = "email-resend"))]
        ProviderConfig::Resend { .. } => Err(NotifyError::ProviderNotAvailable(
            "Resend support not compiled in. Enable the 'email-resend' feature.".to_string(),
        )),
        #[cfg(feature = "email-smtp")]
        ProviderConfig::Smtp {
            host,
            port,
            username,
            password,
            use_tls,
        } => {
            let provider = smtp::SmtpNotifier::new(
                host.clone(),
                *port,
                username.clone(),
                password.clone(),
                *use_tls,
                config.from_address.clone(),
                config.from_name.clone(),
            )?;
            Ok(Box::new(provider))
        }
        #[cfg(not(feature = "email-smtp"))]
        ProviderConfig::Smtp { .. } => Err(NotifyError::ProviderNotAvailable(
            "SMTP support not compiled in. Enable the 'email-smtp' feature.".to_string(),
        )),
    }
}

/// A delivered message captured by [`MemoryNotifier`].
#[derive(Debug, Clone)]
pub struct SentNotification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// In-memory notifier that records every message instead of sending it.
///
/// Only broadcast within a single process; meant for tests and development.
#[derive(Default)]
pub struct MemoryNotifier {
    sent: std::sync::Mutex<Vec<SentNotification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far, in order.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(SentNotification {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}
