use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{Notification, Notifier};
use crate::config::MailConfig;
use crate::error::{JobConnectError, Result};

/// Delivers notifications as email through an HTTP mail relay.
///
/// Each message is POSTed as JSON to the relay endpoint; any non-2xx answer
/// counts as a failed delivery.
#[derive(Debug, Clone)]
pub struct MailRelayNotifier {
    client: reqwest::Client,
    endpoint: Url,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl MailRelayNotifier {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.relay_url).map_err(|e| {
            JobConnectError::configuration(format!("invalid mail relay url {}: {}", config.relay_url, e))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }
}

#[async_trait]
impl Notifier for MailRelayNotifier {
    fn name(&self) -> &'static str {
        "mail_relay"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let message = RelayMessage {
            from: &self.from,
            to: &self.to,
            subject: &notification.subject,
            text: &notification.text,
            html: &notification.html,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&message)
            .send()
            .await?
            .error_for_status()?;

        debug!(status = response.status().as_u16(), to = %self.to, "mail relayed");
        Ok(())
    }
}
