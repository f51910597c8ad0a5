//! Resend notification provider implementation.

use super::{Notifier, NotifyError};
use async_trait::async_trait;
use resend_rs::{types::CreateEmailBaseOptions, Resend};

/// Resend email provider.
pub struct ResendNotifier {
    client: Resend,
    from_address: String,
    from_name: Option<String>,
}

impl ResendNotifier {
    /// Create a new Resend provider with the given API key.
    pub fn new(api_key: String, from_address: String, from_name: Option<String>) -> Self {
        Self {
            client: Resend::new(&api_key),
            from_address,
            from_name,
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let from = match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_address),
            None => self.from_address.clone(),
        };

        let email = CreateEmailBaseOptions::new(from, vec![to.to_string()], subject.to_string())
            .with_text(body);

        self.client
            .emails
            .send(email)
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        Ok(())
    }
}
