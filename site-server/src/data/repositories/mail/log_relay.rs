use async_trait::async_trait;
use tracing::info;

use crate::data::mail_relay::{MailRelay, OutgoingMail};
use crate::domain::error::DomainError;

/// Relay used when no mail credentials are configured: the message only
/// reaches the server log.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogMailRelay;

#[async_trait]
impl MailRelay for LogMailRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError> {
        info!(
            reply_to = %mail.reply_to,
            subject = %mail.subject,
            length = mail.text.len(),
            "mail relay not configured, contact message logged only"
        );
        Ok(())
    }
}
