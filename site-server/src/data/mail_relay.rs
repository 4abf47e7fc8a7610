use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutgoingMail {
    pub(crate) reply_to: String,
    pub(crate) subject: String,
    pub(crate) text: String,
}

#[async_trait]
pub(crate) trait MailRelay: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: MailRelay + ?Sized> MailRelay for Arc<T> {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError> {
        (**self).send(mail).await
    }
}
