use tracing::info;

use crate::data::mail_relay::{MailRelay, OutgoingMail};
use crate::domain::contact::ContactMessage;
use crate::domain::error::DomainError;

pub(crate) struct ContactService<M: MailRelay> {
    relay: M,
}

impl<M: MailRelay> ContactService<M> {
    pub(crate) fn new(relay: M) -> Self {
        Self { relay }
    }

    pub(crate) async fn submit(&self, message: ContactMessage) -> Result<(), DomainError> {
        let message = message.validate()?;
        let mail = OutgoingMail {
            reply_to: message.email.clone(),
            subject: message.subject(),
            text: render_body(&message),
        };

        self.relay.send(mail).await?;
        info!(company = message.company.as_deref().unwrap_or("-"), "contact message forwarded");
        Ok(())
    }
}

fn render_body(message: &ContactMessage) -> String {
    let mut body = format!("Name: {}\nEmail: {}\n", message.name, message.email);
    if let Some(company) = &message.company {
        body.push_str(&format!("Company: {company}\n"));
    }
    body.push('\n');
    body.push_str(&message.message);
    body
}

#[cfg(test)]
mod tests {
    use super::ContactService;
    use crate::domain::contact::ContactMessage;
    use crate::domain::error::DomainError;
    use crate::test_support::FakeMailRelay;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            company: Some("Navy".to_string()),
            message: "Please send pricing details.".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_forwards_rendered_mail() {
        let relay = FakeMailRelay::default();
        let service = ContactService::new(relay.clone());

        service.submit(message()).await.expect("submit must succeed");

        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "grace@example.com");
        assert_eq!(sent[0].subject, "New inquiry from Grace (Navy)");
        assert!(sent[0].text.contains("Company: Navy"));
        assert!(sent[0].text.ends_with("Please send pricing details."));
    }

    #[tokio::test]
    async fn relay_failure_is_reported() {
        let relay = FakeMailRelay::failing();
        let service = ContactService::new(relay);

        let err = service.submit(message()).await.expect_err("relay down");
        assert!(matches!(err, DomainError::Upstream(_)));
    }

    #[tokio::test]
    async fn invalid_message_never_reaches_relay() {
        let relay = FakeMailRelay::default();
        let service = ContactService::new(relay.clone());

        let mut bad = message();
        bad.email = "not-an-email".to_string();
        assert!(service.submit(bad).await.is_err());
        assert!(relay.sent().is_empty());
    }
}
