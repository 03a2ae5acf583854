use async_trait::async_trait;
use folio_error::{FolioError, FolioResult};
use folio_models::{mail::MailMessage, settings::Mail, Mailer};
use reqwest::Client;
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tracing::{info, instrument};

/// Posts `{from, to, subject, text}` JSON to a transactional mail API.
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct Payload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(settings: &Mail) -> FolioResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| FolioError::MailError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            from: settings.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    #[instrument(name = "mail-send", skip_all, fields(to = %message.to))]
    async fn send(&self, message: MailMessage) -> FolioResult<()> {
        let payload = Payload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| FolioError::MailError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::MailError(format!(
                "mail API responded with {status}"
            )));
        }
        info!("Mail sent");
        Ok(())
    }
}

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> FolioResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Mail delivery disabled, message not sent:\n{}",
            message.text
        );
        Ok(())
    }
}

/// Picks the transport from `[mail]`; an enabled mailer needs an API key.
pub fn mailer_from_settings(settings: &Mail) -> FolioResult<Arc<dyn Mailer>> {
    if !settings.enabled {
        info!("Mail delivery disabled, outgoing mail will be logged");
        return Ok(Arc::new(LogMailer));
    }
    if settings.api_key.trim().is_empty() {
        return Err(FolioError::ConfigurationError(
            "mail.api_key is required when mail.enabled is true".into(),
        ));
    }
    Ok(Arc::new(HttpMailer::new(settings)?))
}
