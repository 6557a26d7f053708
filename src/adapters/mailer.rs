use crate::config::SiteConfig;
use crate::domain::model::OutboundMail;
use crate::domain::ports::Mailer;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;

/// Client for a Resend-style transactional email API.
#[derive(Debug)]
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let api_key = config
            .mail_api_key()
            .ok_or(SiteError::MissingCredential { service: "mail" })?
            .to_string();

        Ok(Self {
            client: Client::new(),
            endpoint: config.mail.endpoint.clone(),
            api_key,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/emails", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<()> {
        tracing::debug!(subject = %mail.subject, "Sending mail through Resend");

        let response = self
            .client
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Mail API rejected the message");
            return Err(SiteError::MailDeliveryError {
                message: format!("mail API returned status {}", status.as_u16()),
            });
        }

        Ok(())
    }
}
