use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Hands a finished message to whatever actually delivers email. Failures are
/// reported as `AppError::DeliveryError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
struct MailApiPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Posts messages as JSON to an HTTP mail relay authenticated with a bearer key.
pub struct HttpMailTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    from: String,
}

impl HttpMailTransport {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build mail client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
        })
    }

    fn payload<'a>(&'a self, mail: &'a OutgoingMail) -> MailApiPayload<'a> {
        MailApiPayload {
            from: &self.from,
            to: [mail.to.as_str()],
            subject: &mail.subject,
            html: &mail.html,
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.payload(&mail))
            .send()
            .await
            .map_err(|e| {
                log::error!("Mail relay request failed: {}", e);
                AppError::DeliveryError(format!("Failed to send email: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Mail relay rejected message to {}: {} {}", mail.to, status, body);
            return Err(AppError::DeliveryError(format!(
                "Mail relay responded with status {}",
                status
            )));
        }

        log::info!("Mail relay accepted message to {}", mail.to);
        Ok(())
    }
}
