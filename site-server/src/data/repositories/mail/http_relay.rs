use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

use crate::data::mail_relay::{MailRelay, OutgoingMail};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct MailRelayConfig {
    pub(crate) api_url: String,
    pub(crate) api_key: String,
    pub(crate) from: String,
    pub(crate) to: String,
}

#[derive(Debug, Serialize)]
struct SendMailDto<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Transactional-mail HTTP API (JSON body, bearer key).
#[derive(Debug, Clone)]
pub(crate) struct HttpMailRelay {
    client: Client,
    config: MailRelayConfig,
}

impl HttpMailRelay {
    pub(crate) fn new(config: MailRelayConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .context("failed to build mail relay http client")?;
        Ok(Self { client, config })
    }

    fn payload<'a>(&'a self, mail: &'a OutgoingMail) -> SendMailDto<'a> {
        SendMailDto {
            from: &self.config.from,
            to: [&self.config.to],
            reply_to: &mail.reply_to,
            subject: &mail.subject,
            text: &mail.text,
        }
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(&mail))
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "mail relay request failed");
                DomainError::Upstream(format!("mail relay: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "mail relay rejected message");
            return Err(DomainError::Upstream(format!("mail relay: http status {status}")));
        }
        Ok(())
    }
}
